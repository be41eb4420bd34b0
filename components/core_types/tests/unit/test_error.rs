//! Unit tests for Diagnostic and Phase

use core_types::{Diagnostic, Phase, SourcePosition};

#[cfg(test)]
mod phase_tests {
    use super::*;

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Lexical.to_string(), "lexico");
        assert_eq!(Phase::Syntax.to_string(), "sintactico");
        assert_eq!(Phase::Semantic.to_string(), "semantico");
    }

    #[test]
    fn test_phase_equality() {
        assert_eq!(Phase::Syntax, Phase::Syntax);
        assert_ne!(Phase::Syntax, Phase::Semantic);
    }

    #[test]
    fn test_phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Lexical).unwrap(), r#""lexical""#);
    }
}

#[cfg(test)]
mod diagnostic_tests {
    use super::*;

    #[test]
    fn test_diagnostic_creation() {
        let diag = Diagnostic::new(Phase::Syntax, "Expected ';'", SourcePosition::new(4, 2));

        assert_eq!(diag.phase, Phase::Syntax);
        assert_eq!(diag.message, "Expected ';'");
        assert_eq!(diag.position, SourcePosition::new(4, 2));
    }

    #[test]
    fn test_lexical_format() {
        let diag = Diagnostic::new(Phase::Lexical, "Unterminated string", SourcePosition::new(1, 7));
        assert_eq!(
            diag.to_string(),
            "Error lexico [linea 1, col 7]: Unterminated string."
        );
    }

    #[test]
    fn test_syntax_format() {
        let diag = Diagnostic::new(Phase::Syntax, "Identifier redeclared: 'a'", SourcePosition::new(1, 9));
        assert_eq!(
            diag.to_string(),
            "Error sintactico [linea 1, col 9]: Identifier redeclared: 'a'."
        );
    }

    #[test]
    fn test_semantic_format() {
        let diag = Diagnostic::new(Phase::Semantic, "'break' outside of 'while'", SourcePosition::new(2, 1));
        assert_eq!(
            diag.to_string(),
            "Error semantico [linea 2, col 1]: 'break' outside of 'while'."
        );
    }

    #[test]
    fn test_diagnostic_clone_is_equal() {
        let diag = Diagnostic::new(Phase::Semantic, "x", SourcePosition::new(1, 1));
        assert_eq!(diag.clone(), diag);
    }
}
