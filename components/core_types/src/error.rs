//! Diagnostic types shared by every phase.
//!
//! No phase ever fails: problems are collected as [`Diagnostic`] values on one
//! of three independent channels and the phase keeps going.

use crate::SourcePosition;
use serde::Serialize;
use std::fmt;

/// The diagnostic channel a problem was reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Raised while turning characters into tokens
    Lexical,
    /// Raised while recognizing declarations, statements or expressions
    Syntax,
    /// Raised while type-checking the AST against the symbol table
    Semantic,
}

impl Phase {
    /// Name used in the rendered message
    pub fn label(self) -> &'static str {
        match self {
            Phase::Lexical => "lexico",
            Phase::Syntax => "sintactico",
            Phase::Semantic => "semantico",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A non-fatal problem found in the source program.
///
/// Renders as `Error <phase> [linea L, col C]: <message>.`; a trailing period
/// is added when the message does not already end with one.
///
/// # Examples
///
/// ```
/// use core_types::{Diagnostic, Phase, SourcePosition};
///
/// let diag = Diagnostic::new(Phase::Lexical, "Invalid character '%'", SourcePosition::new(2, 7));
///
/// assert_eq!(diag.phase, Phase::Lexical);
/// assert_eq!(diag.to_string(), "Error lexico [linea 2, col 7]: Invalid character '%'.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Channel the diagnostic belongs to
    pub phase: Phase,
    /// Human-readable description
    pub message: String,
    /// Where the offending construct starts
    pub position: SourcePosition,
}

impl Diagnostic {
    /// Create a diagnostic on the given channel
    pub fn new(phase: Phase, message: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            phase,
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error {} [linea {}, col {}]: {}",
            self.phase, self.position.line, self.position.column, self.message
        )?;
        if !self.message.ends_with('.') {
            f.write_str(".")?;
        }
        Ok(())
    }
}
