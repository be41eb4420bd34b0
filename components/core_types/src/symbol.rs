//! Global symbol table.
//!
//! The table is built once by the declaration collector. After that, the only
//! thing that changes is each symbol's stored literal value, and only the
//! semantic analyzer writes it.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Scope name carried by every symbol (the language has a single scope)
pub const GLOBAL_SCOPE: &str = "global";

/// Declared type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    /// Declared with `long`
    Long,
    /// Declared with `double`
    Double,
}

impl DataType {
    /// Upper-case name used in reports
    pub fn name(self) -> &'static str {
        match self {
            DataType::Long => "LONG",
            DataType::Double => "DOUBLE",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Padding flags must reach the name, so go through `pad`
        f.pad(self.name())
    }
}

/// A declared variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    /// Variable name
    pub name: String,
    /// Declared type
    pub data_type: DataType,
    /// Scope name, always [`GLOBAL_SCOPE`]
    pub scope: &'static str,
    /// Line of the declaring identifier
    pub line: u32,
    value: Option<String>,
}

impl Symbol {
    /// Create a symbol in the global scope with no known value
    pub fn new(name: impl Into<String>, data_type: DataType, line: u32) -> Self {
        Self {
            name: name.into(),
            data_type,
            scope: GLOBAL_SCOPE,
            line,
            value: None,
        }
    }

    /// Literal text last assigned to this symbol, if known
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<14} | {:<8} | {:<8} | {:<5} | {}",
            self.name,
            self.data_type,
            self.scope,
            self.line,
            self.value().unwrap_or("N/A")
        )
    }
}

/// Returned by [`SymbolTable::insert`] when the name is already taken.
///
/// Carries the rejected symbol back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSymbol(pub Symbol);

/// Insertion-ordered mapping from name to [`Symbol`].
///
/// Names are unique: the first declaration wins and later ones are rejected
/// without replacing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol, rejecting it if the name is already declared
    pub fn insert(&mut self, symbol: Symbol) -> Result<(), DuplicateSymbol> {
        if self.index.contains_key(&symbol.name) {
            return Err(DuplicateSymbol(symbol));
        }
        self.index.insert(symbol.name.clone(), self.symbols.len());
        self.symbols.push(symbol);
        Ok(())
    }

    /// Look up a symbol by name
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&i| &self.symbols[i])
    }

    /// Whether `name` is declared
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Replace the stored value of `name`; `None` marks it unknown.
    ///
    /// Returns `false` if no such symbol exists.
    pub fn set_value(&mut self, name: &str, value: Option<String>) -> bool {
        match self.index.get(name) {
            Some(&i) => {
                self.symbols[i].value = value;
                true
            }
            None => false,
        }
    }

    /// Symbols in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Header row matching the [`Symbol`] row layout
    pub fn header() -> String {
        format!(
            "{:<14} | {:<8} | {:<8} | {:<5} | {}",
            "Name", "Type", "Scope", "Line", "Value"
        )
    }
}

impl Serialize for SymbolTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.symbols.iter())
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}
