//! Declaration collection (first pass over the token list).
//!
//! Only `("long" | "double") IDENT ("," IDENT)* ";"` is recognized here; every
//! other token is skipped without inspection. This pass is the sole writer of
//! the symbol table and the sole source of declaration diagnostics.

use crate::error::syntax_error;
use crate::lexer::{Token, TokenKind};
use core_types::{DataType, Diagnostic, Symbol, SymbolTable};

/// Collect every declaration in `tokens` into a fresh symbol table
pub fn collect(tokens: &[Token]) -> (SymbolTable, Vec<Diagnostic>) {
    DeclarationCollector::new(tokens).collect()
}

/// Walks a token list registering declared variables
pub struct DeclarationCollector<'t> {
    tokens: &'t [Token],
    current: usize,
    table: SymbolTable,
    errors: Vec<Diagnostic>,
}

impl<'t> DeclarationCollector<'t> {
    /// Create a collector over `tokens`
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            current: 0,
            table: SymbolTable::new(),
            errors: Vec::new(),
        }
    }

    /// Run the pass
    pub fn collect(mut self) -> (SymbolTable, Vec<Diagnostic>) {
        let tokens = self.tokens;
        while let Some(token) = tokens.get(self.current) {
            self.current += 1;
            let data_type = match token.kind {
                TokenKind::Long => DataType::Long,
                TokenKind::Double => DataType::Double,
                _ => continue,
            };
            self.declaration(token, data_type);
        }
        (self.table, self.errors)
    }

    /// Identifier list after the type keyword
    fn declaration(&mut self, keyword: &Token, data_type: DataType) {
        let tokens = self.tokens;
        loop {
            let Some(token) = tokens.get(self.current) else {
                self.errors.push(syntax_error(
                    "Incomplete declaration (missing ';')",
                    keyword.position,
                ));
                return;
            };

            if token.kind != TokenKind::Identifier {
                self.errors
                    .push(syntax_error("Expected an identifier", token.position));
                self.synchronize();
                return;
            }

            let symbol = Symbol::new(token.lexeme.clone(), data_type, token.position.line);
            if self.table.insert(symbol).is_err() {
                self.errors.push(syntax_error(
                    format!("Identifier redeclared: '{}'", token.lexeme),
                    token.position,
                ));
            }
            self.current += 1;

            let Some(separator) = tokens.get(self.current) else {
                self.errors.push(syntax_error(
                    "Incomplete declaration (missing ';')",
                    keyword.position,
                ));
                return;
            };

            match separator.kind {
                TokenKind::Comma => self.current += 1,
                TokenKind::Semicolon => {
                    self.current += 1;
                    return;
                }
                _ => {
                    self.errors.push(syntax_error(
                        "Expected ',' or ';' after identifier",
                        separator.position,
                    ));
                    self.synchronize();
                    return;
                }
            }
        }
    }

    /// Skip to just past the next `;`, or to EOF
    fn synchronize(&mut self) {
        while let Some(token) = self.tokens.get(self.current) {
            match token.kind {
                TokenKind::Semicolon => {
                    self.current += 1;
                    return;
                }
                TokenKind::Eof => return,
                _ => self.current += 1,
            }
        }
    }
}
