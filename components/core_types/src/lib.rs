//! Shared data model for the compiler front end.
//!
//! This crate provides the types every phase agrees on: source positions,
//! the three diagnostic channels, and the global symbol table.
//!
//! # Overview
//!
//! - [`SourcePosition`] - Line/column location in the source text
//! - [`Diagnostic`] - A formatted, non-fatal problem report
//! - [`Phase`] - Which channel (lexical, syntax, semantic) a diagnostic belongs to
//! - [`DataType`] - Declared type of a variable (`long` or `double`)
//! - [`Symbol`] - One declared variable
//! - [`SymbolTable`] - Insertion-ordered name to symbol store
//!
//! # Examples
//!
//! ```
//! use core_types::{DataType, Diagnostic, Phase, SourcePosition, Symbol, SymbolTable};
//!
//! let mut table = SymbolTable::new();
//! assert!(table.insert(Symbol::new("x", DataType::Long, 1)).is_ok());
//! assert!(table.insert(Symbol::new("x", DataType::Double, 2)).is_err());
//!
//! let diag = Diagnostic::new(Phase::Semantic, "Undeclared identifier 'y'", SourcePosition::new(3, 1));
//! assert_eq!(diag.to_string(), "Error semantico [linea 3, col 1]: Undeclared identifier 'y'.");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;
mod symbol;

pub use error::{Diagnostic, Phase};
pub use source::SourcePosition;
pub use symbol::{DataType, DuplicateSymbol, Symbol, SymbolTable, GLOBAL_SCOPE};
