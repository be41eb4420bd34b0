//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific errors
///
/// Problems in the analyzed program are never errors here; they are part of
/// the report. These are the conditions that stop the tool before or outside
/// the pipeline.
#[derive(Debug, Error)]
pub enum CliError {
    /// Source file could not be read
    #[error("Could not read file '{path}': {source}", path = path.display())]
    Io {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// No input was given
    #[error("{0}")]
    Usage(String),

    /// Line editor failure
    #[error("REPL error: {0}")]
    Repl(String),

    /// Report serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
