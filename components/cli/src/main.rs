//! frontc
//!
//! Entry point for the compiler front end. Parses CLI arguments and
//! hands them to `front_cli::run`.

use clap::Parser as ClapParser;
use front_cli::{run, Cli, CliError};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(usage)) => {
            eprintln!("{}", usage);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
