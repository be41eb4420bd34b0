//! Rendering of a front-end run as text or JSON

use core_types::SymbolTable;
use parser::Compilation;
use serde::Serialize;
use std::fmt;

/// Which optional sections a text report shows.
///
/// Diagnostic sections are always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
    /// Token list
    pub tokens: bool,
    /// Statement list
    pub ast: bool,
    /// Symbol table, before and after semantic analysis
    pub symbols: bool,
}

impl Sections {
    /// Every section
    pub fn all() -> Self {
        Self {
            tokens: true,
            ast: true,
            symbols: true,
        }
    }

    /// Diagnostics only
    pub fn diagnostics_only() -> Self {
        Self {
            tokens: false,
            ast: false,
            symbols: false,
        }
    }
}

impl Default for Sections {
    fn default() -> Self {
        Self::all()
    }
}

/// Diagnostic counts per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Lexical errors
    pub lexical: usize,
    /// Syntax errors from the declaration collector
    pub declaration: usize,
    /// Syntax errors from the parser
    pub syntax: usize,
    /// Semantic errors
    pub semantic: usize,
}

impl Summary {
    /// Count the diagnostics of `compilation`
    pub fn of(compilation: &Compilation) -> Self {
        Self {
            lexical: compilation.lexical_errors.len(),
            declaration: compilation.declaration_errors.len(),
            syntax: compilation.syntax_errors.len(),
            semantic: compilation.semantic_errors.len(),
        }
    }

    /// Total number of diagnostics
    pub fn total(&self) -> usize {
        self.lexical + self.declaration + self.syntax + self.semantic
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} diagnostic(s): {} lexical, {} syntax, {} semantic",
            self.total(),
            self.lexical,
            self.declaration + self.syntax,
            self.semantic
        )
    }
}

/// One analyzed program with everything needed to print it
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Where the source came from (file path, `<demo>`, `<repl>`)
    pub source: String,
    /// Pipeline output
    #[serde(flatten)]
    pub compilation: Compilation,
    /// Diagnostic counts
    pub summary: Summary,
}

impl Report {
    /// Wrap a finished compilation
    pub fn new(source: impl Into<String>, compilation: Compilation) -> Self {
        let summary = Summary::of(&compilation);
        Self {
            source: source.into(),
            compilation,
            summary,
        }
    }

    /// True when no phase reported anything
    pub fn is_clean(&self) -> bool {
        self.summary.total() == 0
    }

    /// Human-readable report in pipeline order
    pub fn render(&self, sections: Sections) -> String {
        let c = &self.compilation;
        let mut output = String::new();

        if sections.tokens {
            push_section(&mut output, "TOKENS", &c.tokens);
        }
        push_section(&mut output, "LEXICAL ERRORS", &c.lexical_errors);
        if sections.symbols {
            push_symbols(&mut output, "SYMBOL TABLE", &c.declarations);
        }
        push_section(&mut output, "DECLARATION ERRORS", &c.declaration_errors);
        if sections.ast {
            push_section(&mut output, "STATEMENTS", &c.statements);
        }
        push_section(&mut output, "SYNTAX ERRORS", &c.syntax_errors);
        push_section(&mut output, "SEMANTIC ERRORS", &c.semantic_errors);
        if sections.symbols {
            push_symbols(
                &mut output,
                "SYMBOL TABLE (AFTER SEMANTIC ANALYSIS)",
                &c.symbols,
            );
        }

        output.push_str(&format!("\n{}\n", self.summary));
        output
    }

    /// Export report as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn push_heading(output: &mut String, title: &str) {
    if !output.is_empty() {
        output.push('\n');
    }
    output.push_str(&format!("=== {} ===\n", title));
}

fn push_section<T: fmt::Display>(output: &mut String, title: &str, items: &[T]) {
    push_heading(output, title);
    if items.is_empty() {
        output.push_str("(none)\n");
    }
    for item in items {
        output.push_str(&format!("{}\n", item));
    }
}

fn push_symbols(output: &mut String, title: &str, table: &SymbolTable) {
    push_heading(output, title);
    if table.is_empty() {
        output.push_str("(none)\n");
        return;
    }
    output.push_str(&format!("{}\n", SymbolTable::header()));
    for symbol in table {
        output.push_str(&format!("{}\n", symbol));
    }
}
