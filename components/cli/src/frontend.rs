//! Front-end orchestration for the CLI
//!
//! The Frontend struct coordinates input and output around the pipeline:
//! - loading source from a file, a string or the built-in sample
//! - running [`parser::compile`]
//! - rendering the result as text or JSON

use crate::error::{CliError, CliResult};
use crate::report::{Report, Sections};
use std::path::Path;

/// Sample program analyzed by `--demo`
pub const DEMO_PROGRAM: &str = include_str!("../programs/demo.src");

/// Drives the compiler front end for the command line and the REPL
#[derive(Debug, Clone, Default)]
pub struct Frontend {
    /// Emit JSON instead of the text report
    json: bool,
    /// Sections shown by the text report
    sections: Sections,
}

impl Frontend {
    /// Create a front end producing the full text report
    ///
    /// # Example
    /// ```
    /// use front_cli::Frontend;
    ///
    /// let frontend = Frontend::new();
    /// assert!(!frontend.is_json());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable JSON output
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Choose the text report sections
    pub fn with_sections(mut self, sections: Sections) -> Self {
        self.sections = sections;
        self
    }

    /// Check if JSON output is enabled
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Sections shown by the text report
    pub fn sections(&self) -> Sections {
        self.sections
    }

    /// Mutable access to the section toggles
    pub fn sections_mut(&mut self) -> &mut Sections {
        &mut self.sections
    }

    /// Analyze a source file
    ///
    /// # Errors
    /// Returns `CliError::Io` if the file cannot be read; nothing is analyzed
    /// in that case.
    ///
    /// # Example
    /// ```no_run
    /// use front_cli::Frontend;
    ///
    /// let report = Frontend::new().analyze_file("program.src").unwrap();
    /// println!("{}", report.summary);
    /// ```
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> CliResult<Report> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.analyze_string(path.display().to_string(), &source))
    }

    /// Analyze source text
    ///
    /// # Example
    /// ```
    /// use front_cli::Frontend;
    ///
    /// let report = Frontend::new().analyze_string("<inline>", "double d; d = 3;");
    /// assert!(report.is_clean());
    /// ```
    pub fn analyze_string(&self, name: impl Into<String>, source: &str) -> Report {
        Report::new(name, parser::compile(source))
    }

    /// Analyze the built-in sample program
    pub fn analyze_demo(&self) -> Report {
        self.analyze_string("<demo>", DEMO_PROGRAM)
    }

    /// Render a report in the configured format
    ///
    /// # Errors
    /// Returns `CliError::Json` if JSON serialization fails
    pub fn render(&self, report: &Report) -> CliResult<String> {
        if self.json {
            Ok(report.to_json()?)
        } else {
            Ok(report.render(self.sections))
        }
    }

    /// Start the REPL (Read-Eval-Print Loop)
    ///
    /// # Errors
    /// Returns `CliError::Repl` if the line editor fails
    pub fn repl(&mut self) -> CliResult<()> {
        crate::repl::run_repl(self)
    }
}
