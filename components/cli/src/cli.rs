//! Command-line arguments

use crate::error::{CliError, CliResult};
use crate::frontend::Frontend;
use clap::Parser as ClapParser;
use std::path::PathBuf;

/// Front end for the `long`/`double` teaching language
#[derive(ClapParser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "frontc", version)]
pub struct Cli {
    /// Source file to analyze
    pub file: Option<PathBuf>,

    /// Print the report as a single JSON document
    #[arg(long)]
    pub json: bool,

    /// Analyze the built-in sample program
    #[arg(short, long, conflicts_with = "file")]
    pub demo: bool,

    /// Start an interactive session
    #[arg(short, long, conflicts_with_all = ["file", "demo"])]
    pub repl: bool,
}

/// Usage text printed when no input is given
pub fn usage() -> String {
    "Usage:\n  \
     frontc <FILE>          Analyze a source file\n  \
     frontc --demo          Analyze the built-in sample program\n  \
     frontc --repl          Start an interactive session\n\n\
     Run 'frontc --help' for more options."
        .to_string()
}

/// Run the mode selected by `args`, printing the report to stdout
///
/// With no file and no mode flag nothing is analyzed and
/// [`CliError::Usage`] carries the usage text.
pub fn run(args: Cli) -> CliResult<()> {
    let mut frontend = Frontend::new().with_json(args.json);

    if args.repl {
        return frontend.repl();
    }

    let report = if args.demo {
        frontend.analyze_demo()
    } else if let Some(file) = &args.file {
        frontend.analyze_file(file)?
    } else {
        return Err(CliError::Usage(usage()));
    };

    println!("{}", frontend.render(&report)?);
    Ok(())
}
