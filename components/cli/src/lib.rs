//! Command-line front end library
//!
//! Provides the Frontend struct and supporting modules for the `frontc` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod frontend;
pub mod repl;
pub mod report;

pub use cli::{run, Cli};
pub use error::{CliError, CliResult};
pub use frontend::{Frontend, DEMO_PROGRAM};
pub use report::{Report, Sections, Summary};
