//! Source position tracking.

use serde::Serialize;
use std::fmt;

/// Represents a position in source code.
///
/// Lines and columns are both 1-indexed; the column counts characters, not
/// bytes.
///
/// # Examples
///
/// ```
/// use core_types::SourcePosition;
///
/// let pos = SourcePosition::new(10, 5);
///
/// assert_eq!(pos.line, 10);
/// assert_eq!(pos.to_string(), "10:5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourcePosition {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed)
    pub column: u32,
}

impl SourcePosition {
    /// Create a position from a line and column
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
