//! Front end for the `long`/`double` teaching language
//!
//! Turns source text into tokens, a symbol table, a statement list and three
//! diagnostic channels (lexical, syntax, semantic). No phase aborts on bad
//! input: each records what it found and hands a complete result to the next.
//!
//! # Overview
//!
//! - [`lexer`] - Tokenizes source text ([`scan`])
//! - [`collector`] - Registers `long`/`double` declarations ([`collect`])
//! - [`parser`] - Recursive descent parser producing the AST ([`parse`])
//! - [`semantic`] - Type checks the AST against the symbol table ([`analyze`])
//! - [`compile`] - Runs all four phases in order
//!
//! # Example
//!
//! ```
//! let result = parser::compile("long a; a = 3.5;");
//!
//! assert!(result.lexical_errors.is_empty());
//! assert_eq!(result.semantic_errors.len(), 1);
//! assert_eq!(result.symbols.get("a").unwrap().value(), None);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod collector;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod semantic;

pub use ast::{BinaryOperator, Expression, LiteralKind, Statement, UnaryOperator};
pub use collector::{collect, DeclarationCollector};
pub use lexer::{scan, Lexer, Token, TokenKind};
pub use parser::{parse, Parser, MAX_EXPRESSION_HEIGHT, MAX_NESTING_DEPTH};
pub use semantic::{analyze, SemanticAnalyzer, Type};

use core_types::{Diagnostic, SymbolTable};
use serde::Serialize;

/// Every artifact produced by one run of the front end
#[derive(Debug, Clone, Serialize)]
pub struct Compilation {
    /// Token list, ending with the EOF sentinel
    pub tokens: Vec<Token>,
    /// Lexical errors
    pub lexical_errors: Vec<Diagnostic>,
    /// Symbol table as the collector left it
    pub declarations: SymbolTable,
    /// Syntax errors reported by the collector
    pub declaration_errors: Vec<Diagnostic>,
    /// Parsed statements (declarations excluded)
    pub statements: Vec<Statement>,
    /// Syntax errors reported by the parser
    pub syntax_errors: Vec<Diagnostic>,
    /// Semantic errors
    pub semantic_errors: Vec<Diagnostic>,
    /// Symbol table after semantic analysis
    pub symbols: SymbolTable,
}

impl Compilation {
    /// True when no phase reported anything
    pub fn is_clean(&self) -> bool {
        self.diagnostics().next().is_none()
    }

    /// All diagnostics in phase order
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.lexical_errors
            .iter()
            .chain(&self.declaration_errors)
            .chain(&self.syntax_errors)
            .chain(&self.semantic_errors)
    }
}

/// Run lexer, collector, parser and semantic analyzer over `source`
pub fn compile(source: &str) -> Compilation {
    let (tokens, lexical_errors) = scan(source);
    let (declarations, declaration_errors) = collect(&tokens);
    let (statements, syntax_errors) = parse(&tokens);

    let mut symbols = declarations.clone();
    let semantic_errors = analyze(&statements, &mut symbols);

    Compilation {
        tokens,
        lexical_errors,
        declarations,
        declaration_errors,
        statements,
        syntax_errors,
        semantic_errors,
        symbols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_keeps_collector_snapshot() {
        let result = compile("double d; d = 3;");
        assert!(result.is_clean());
        assert_eq!(result.declarations.get("d").unwrap().value(), None);
        assert_eq!(result.symbols.get("d").unwrap().value(), Some("3"));
    }

    #[test]
    fn test_diagnostics_in_phase_order() {
        let result = compile("long a, a; @ x = 1;");
        let phases: Vec<_> = result.diagnostics().map(|d| d.phase).collect();
        assert_eq!(
            phases,
            vec![
                core_types::Phase::Lexical,
                core_types::Phase::Syntax,
                core_types::Phase::Semantic
            ]
        );
    }

    #[test]
    fn test_deeply_nested_program_stays_total() {
        let source = format!(
            "long a;\nwrite({}1{});\nwhile (a < 1) {}a = 1;{}",
            "(".repeat(10_000),
            ")".repeat(10_000),
            "{".repeat(5_000),
            "}".repeat(5_000)
        );
        let result = compile(&source);

        let messages: Vec<_> = result.diagnostics().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Expression nested too deeply", "Statements nested too deeply"]
        );
        assert_eq!(result.statements.len(), 2);
        assert!(!result.statements[0].to_string().is_empty());
        assert!(serde_json::to_string(&result).is_ok());
    }
}
