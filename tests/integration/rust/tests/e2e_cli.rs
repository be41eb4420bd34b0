//! End-to-End CLI Integration Tests
//!
//! Tests the compiler front end through the front_cli Frontend API.
//! This is the highest level integration test - source file to final report.

use front_cli::{run, Cli, CliError, Frontend, Report, Sections, DEMO_PROGRAM};
use std::fs;
use tempfile::TempDir;

fn section<'a>(text: &'a str, title: &str) -> Vec<&'a str> {
    let heading = format!("=== {} ===", title);
    text.lines()
        .skip_while(|line| *line != heading)
        .skip(1)
        .take_while(|line| !line.is_empty())
        .collect()
}

/// Test: a clean program renders every section
#[test]
fn test_e2e_clean_program() {
    let report = Frontend::new().analyze_string("<e2e>", "long x;\nx = 1 + 2;\nwrite(x);");
    let text = report.render(Sections::all());

    assert_eq!(
        section(&text, "TOKENS")[..3],
        [
            "KW_LONG('long') @ 1:1",
            "IDENTIFIER('x') @ 1:6",
            "SEMICOLON(';') @ 1:7",
        ]
    );
    assert_eq!(section(&text, "LEXICAL ERRORS"), vec!["(none)"]);
    assert_eq!(
        section(&text, "STATEMENTS"),
        vec![
            "Assignment(x = Binary(Literal(INT_LITERAL:1) + Literal(INT_LITERAL:2)))",
            "Write(Var(x))",
        ]
    );
    assert_eq!(section(&text, "SEMANTIC ERRORS"), vec!["(none)"]);
    assert_eq!(
        section(&text, "SYMBOL TABLE"),
        vec![
            "Name           | Type     | Scope    | Line  | Value",
            "x              | LONG     | global   | 1     | N/A",
        ]
    );
    assert!(report.is_clean());
}

/// Test: symbol values appear only in the final table
#[test]
fn test_e2e_tracked_values() {
    let report = Frontend::new().analyze_string("<e2e>", "long a; double b;\na = 7;\nb = (1.25);");
    let text = report.render(Sections::all());

    assert_eq!(
        section(&text, "SYMBOL TABLE (AFTER SEMANTIC ANALYSIS)")[1..],
        [
            "a              | LONG     | global   | 1     | 7",
            "b              | DOUBLE   | global   | 1     | 1.25",
        ]
    );
    assert!(section(&text, "SYMBOL TABLE")
        .iter()
        .skip(1)
        .all(|row| row.ends_with("| N/A")));
}

/// Test: every diagnostic channel shows up in its own section
#[test]
fn test_e2e_error_sections() {
    let report = Frontend::new().analyze_string("<e2e>", "long a b;\nif (a) write(a);\n~");
    let text = report.render(Sections::diagnostics_only());

    assert_eq!(
        section(&text, "LEXICAL ERRORS"),
        vec!["Error lexico [linea 3, col 1]: Invalid character: '~'."]
    );
    assert_eq!(
        section(&text, "DECLARATION ERRORS"),
        vec!["Error sintactico [linea 1, col 8]: Expected ',' or ';' after identifier."]
    );
    assert_eq!(
        section(&text, "SYNTAX ERRORS"),
        vec!["Error sintactico [linea 2, col 8]: Expected 'then' after 'if (condition)'."]
    );
    assert_eq!(
        section(&text, "SEMANTIC ERRORS"),
        vec!["Error semantico [linea 2, col 1]: The 'if' condition must be boolean or a comparison (got: INTEGER)."]
    );
}

/// Test: file on disk through the JSON path
#[test]
fn test_e2e_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loop.src");
    fs::write(&path, "long i;\ni = 0;\nwhile (i < 3) i += 1;\nbreak;\n").unwrap();

    let frontend = Frontend::new().with_json(true);
    let report: Report = frontend.analyze_file(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&frontend.render(&report).unwrap()).unwrap();

    assert_eq!(value["summary"]["semantic"], 1);
    assert_eq!(value["semantic_errors"][0]["phase"], "semantic");
    assert_eq!(value["semantic_errors"][0]["position"]["line"], 4);
    assert_eq!(value["statements"][1]["type"], "While");
    assert_eq!(value["symbols"][0]["value"], serde_json::Value::Null);
}

/// Test: unreadable input never reaches the pipeline
#[test]
fn test_e2e_unreadable_file() {
    let dir = TempDir::new().unwrap();

    // A directory cannot be read as a source file
    let err = Frontend::new().analyze_file(dir.path()).unwrap_err();
    assert!(matches!(err, CliError::Io { .. }));
}

/// Test: the built-in sample program
#[test]
fn test_e2e_demo_program() {
    let frontend = Frontend::new();
    let report = frontend.analyze_demo();

    assert_eq!(
        report.compilation.tokens.len(),
        parser::scan(DEMO_PROGRAM).0.len()
    );
    assert!(report
        .compilation
        .symbols
        .contains("this_identifier_is_much_longer_t"));
    assert_eq!(report.summary.lexical, 2);
}

/// Test: pathologically nested input yields one syntax error and a full report
#[test]
fn test_e2e_deeply_nested_source() {
    let source = format!("long a;\na = {}1{};", "(".repeat(10_000), ")".repeat(10_000));
    let frontend = Frontend::new();
    let report = frontend.analyze_string("<e2e>", &source);
    let text = report.render(Sections::all());

    assert_eq!(
        section(&text, "SYNTAX ERRORS"),
        vec!["Error sintactico [linea 2, col 132]: Expression nested too deeply."]
    );
    assert_eq!(section(&text, "STATEMENTS").len(), 1);
    assert!(Frontend::new().with_json(true).render(&report).is_ok());
}

/// Test: no input argument stops before any phase with the usage text
#[test]
fn test_e2e_run_without_input() {
    let err = run(Cli::default()).unwrap_err();

    assert!(matches!(&err, CliError::Usage(text) if text.contains("--demo")));
    assert_eq!(err.exit_code(), 2);
}

