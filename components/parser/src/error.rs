//! Diagnostic constructors for the three channels

use core_types::{Diagnostic, Phase, SourcePosition};

/// Create a lexical error at a given position
pub fn lexical_error(message: impl Into<String>, position: SourcePosition) -> Diagnostic {
    Diagnostic::new(Phase::Lexical, message, position)
}

/// Create a syntax error at a given position
pub fn syntax_error(message: impl Into<String>, position: SourcePosition) -> Diagnostic {
    Diagnostic::new(Phase::Syntax, message, position)
}

/// Create a semantic error at a given position
pub fn semantic_error(message: impl Into<String>, position: SourcePosition) -> Diagnostic {
    Diagnostic::new(Phase::Semantic, message, position)
}
