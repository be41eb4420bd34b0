//! Full Pipeline Integration Tests
//!
//! Tests the complete flow: Source -> Lexer -> Tokens -> Collector -> Symbol Table
//! -> Parser -> Statements -> Semantic Analyzer -> Diagnostics + final table.

use core_types::{Diagnostic, Phase, SymbolTable};
use parser::{analyze, collect, compile, parse, scan, Statement, TokenKind};

/// Run every phase by hand, the way a host program would
fn run_phases(source: &str) -> (Vec<Statement>, SymbolTable, Vec<Diagnostic>) {
    let (tokens, mut diagnostics) = scan(source);
    let (mut table, declaration_errors) = collect(&tokens);
    let (statements, syntax_errors) = parse(&tokens);
    let semantic_errors = analyze(&statements, &mut table);

    diagnostics.extend(declaration_errors);
    diagnostics.extend(syntax_errors);
    diagnostics.extend(semantic_errors);
    (statements, table, diagnostics)
}

fn count(diagnostics: &[Diagnostic], phase: Phase) -> usize {
    diagnostics.iter().filter(|d| d.phase == phase).count()
}

/// Test: token list always ends with the sentinel
#[test]
fn test_full_pipeline_eof_sentinel() {
    for source in ["", "   ", "long a;", "// only a comment", "write(1 <> 2);\n"] {
        let (tokens, errors) = scan(source);
        assert!(errors.is_empty(), "{:?}", source);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert!(tokens[..tokens.len() - 1]
            .iter()
            .all(|t| t.kind != TokenKind::Eof && !t.lexeme.is_empty()));
    }
}

/// Test: a 40-character identifier is truncated to 32 with one error
#[test]
fn test_full_pipeline_identifier_truncation() {
    let source = format!("long {};", "a".repeat(40));
    let result = compile(&source);

    assert_eq!(result.lexical_errors.len(), 1);
    let identifiers: Vec<_> = result
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Identifier)
        .collect();
    assert_eq!(identifiers.len(), 1);
    assert_eq!(identifiers[0].lexeme, "a".repeat(32));
    assert!(result.symbols.contains(&"a".repeat(32)));
}

/// Test: redeclaration keeps one symbol and reports once
#[test]
fn test_full_pipeline_redeclaration() {
    let (_, table, diagnostics) = run_phases("long a, a;");

    assert_eq!(table.len(), 1);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].phase, Phase::Syntax);
    assert!(diagnostics[0].message.contains("redeclared"));
}

/// Test: decimal into long is rejected and leaves the value unset
#[test]
fn test_full_pipeline_narrowing_assignment() {
    let (_, table, diagnostics) = run_phases("long a; a = 3.5;");

    assert_eq!(count(&diagnostics, Phase::Semantic), 1);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(table.get("a").unwrap().value(), None);
    assert!(table.get("a").unwrap().to_string().ends_with("| N/A"));
}

/// Test: integer into double widens and is tracked
#[test]
fn test_full_pipeline_widening_assignment() {
    let (_, table, diagnostics) = run_phases("double d; d = 3;");

    assert!(diagnostics.is_empty());
    assert_eq!(table.get("d").unwrap().value(), Some("3"));
}

/// Test: only the break outside the loop is reported
#[test]
fn test_full_pipeline_break_outside_loop() {
    let (_, _, diagnostics) = run_phases("while (1>0) { break; } break;");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].phase, Phase::Semantic);
    assert_eq!(diagnostics[0].position.column, 24);
}

/// Test: unterminated string at end of input
#[test]
fn test_full_pipeline_unterminated_string() {
    let result = compile("write(\"abc");

    assert_eq!(result.lexical_errors.len(), 1);
    assert!(result
        .tokens
        .iter()
        .all(|t| t.kind != TokenKind::StringLiteral));
    assert!(!result.syntax_errors.is_empty());
    assert!(result
        .syntax_errors
        .iter()
        .any(|e| e.message == "Invalid expression"));
}

/// Test: compound assignment to an undeclared variable reports both uses
#[test]
fn test_full_pipeline_undeclared_compound_assignment() {
    let (statements, _, diagnostics) = run_phases("a += 5;");

    assert_eq!(
        statements[0].to_string(),
        "Assignment(a = Binary(Var(a) + Literal(INT_LITERAL:5)))"
    );
    let undeclared: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.message == "Undeclared identifier 'a'")
        .collect();
    assert_eq!(undeclared.len(), 2);
    assert_eq!(diagnostics.len(), 2);
}

/// Test: the separate phases and compile() agree
#[test]
fn test_full_pipeline_matches_compile() {
    let source = "long n; double x;\nread(n);\nx = n / 2.0;\nif (x >= 1) then write(x); else write(\"small\");";
    let (statements, table, diagnostics) = run_phases(source);
    let result = compile(source);

    assert_eq!(result.statements, statements);
    assert_eq!(result.symbols, table);
    assert_eq!(result.diagnostics().cloned().collect::<Vec<_>>(), diagnostics);
    assert!(result.is_clean());
}

/// Test: declarations inside blocks reach the table before analysis
#[test]
fn test_full_pipeline_block_declarations() {
    let (statements, table, diagnostics) =
        run_phases("long n; n = 3;\nwhile (n > 0) {\n  long step;\n  step = 1;\n  n -= step;\n}");

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert!(table.contains("step"));
    assert_eq!(table.get("step").unwrap().line, 3);
    assert_eq!(table.get("step").unwrap().value(), Some("1"));
    assert_eq!(table.get("n").unwrap().value(), None);
    assert_eq!(statements.len(), 2);
}

/// Test: rendered diagnostics use the fixed format
#[test]
fn test_full_pipeline_diagnostic_format() {
    let result = compile("long a;\n  a = \"x\" ;\n?");
    let rendered: Vec<String> = result.diagnostics().map(|d| d.to_string()).collect();

    assert_eq!(
        rendered,
        vec![
            "Error lexico [linea 3, col 1]: Invalid character: '?'.",
            "Error semantico [linea 2, col 3]: Incompatible types in assignment: variable 'a' is LONG but the expression is TEXT.",
        ]
    );
}

/// Test: garbage input terminates with errors in every channel it touches
#[test]
fn test_full_pipeline_garbage_terminates() {
    let source = "}}}} ((( ;;; long ,,, double 1.5 if else then while && || & | \" ";
    let result = compile(source);

    assert!(!result.lexical_errors.is_empty());
    assert!(!result.declaration_errors.is_empty());
    assert!(!result.syntax_errors.is_empty());
}
