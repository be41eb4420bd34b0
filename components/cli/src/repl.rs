//! REPL (Read-Eval-Print Loop) implementation
//!
//! Every complete snippet is analyzed on its own, with a fresh symbol table.

use crate::error::{CliError, CliResult};
use crate::frontend::Frontend;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Run the interactive REPL
///
/// # Arguments
/// * `frontend` - The Frontend used to analyze and render each snippet
///
/// # Returns
/// `Ok(())` when REPL exits normally
pub fn run_repl(frontend: &mut Frontend) -> CliResult<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Repl(format!("Failed to initialize editor: {}", e)))?;

    println!("frontc {}", env!("CARGO_PKG_VERSION"));
    println!("Type a program, '.help' for commands or 'exit' to quit.");
    println!();

    let mut buffer = String::new();
    let mut in_multiline = false;

    loop {
        let prompt = if in_multiline { "... " } else { "> " };

        match editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if !in_multiline && is_exit_command(trimmed) {
                    println!("Goodbye!");
                    break;
                }

                if !in_multiline && trimmed.starts_with('.') {
                    handle_repl_command(trimmed, frontend);
                    continue;
                }

                if !in_multiline && trimmed.is_empty() {
                    continue;
                }

                // An empty line forces a pending snippet through
                let force = in_multiline && trimmed.is_empty();
                if in_multiline {
                    buffer.push('\n');
                }
                buffer.push_str(&line);

                if !force && !is_input_complete(&buffer) {
                    in_multiline = true;
                    continue;
                }

                let _ = editor.add_history_entry(buffer.as_str());
                let report = frontend.analyze_string("<repl>", &buffer);
                match frontend.render(&report) {
                    Ok(text) => println!("{}", text),
                    Err(e) => eprintln!("Error: {}", e),
                }

                buffer.clear();
                in_multiline = false;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C
                if in_multiline {
                    println!("^C");
                    buffer.clear();
                    in_multiline = false;
                } else {
                    println!("Press Ctrl-D or type 'exit' to quit");
                }
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                return Err(CliError::Repl(format!("Readline error: {}", err)));
            }
        }
    }

    Ok(())
}

fn is_exit_command(input: &str) -> bool {
    matches!(input, "exit" | "quit" | ".exit")
}

/// Handle special REPL commands
fn handle_repl_command(command: &str, frontend: &mut Frontend) {
    let sections = frontend.sections_mut();
    match command {
        ".help" => {
            println!("REPL Commands:");
            println!("  .help     - Show this help message");
            println!("  .tokens   - Toggle the token list");
            println!("  .ast      - Toggle the statement list");
            println!("  .symbols  - Toggle the symbol tables");
            println!("  .exit     - Exit the REPL");
            println!("  exit      - Exit the REPL");
            println!("  quit      - Exit the REPL");
            println!();
            println!("A snippet runs once its braces and parentheses are balanced and");
            println!("it ends with ';' or '}}'. An empty line runs it as it is.");
        }
        ".tokens" => {
            sections.tokens = !sections.tokens;
            println!("Tokens: {}", on_off(sections.tokens));
        }
        ".ast" => {
            sections.ast = !sections.ast;
            println!("Statements: {}", on_off(sections.ast));
        }
        ".symbols" => {
            sections.symbols = !sections.symbols;
            println!("Symbol tables: {}", on_off(sections.symbols));
        }
        _ => {
            println!("Unknown command: {}", command);
            println!("Type .help for available commands");
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "shown"
    } else {
        "hidden"
    }
}

/// Check if the input appears to be complete
///
/// Braces and parentheses must balance outside strings and comments, and the
/// last significant character must be `;` or `}`.
fn is_input_complete(input: &str) -> bool {
    let chars: Vec<char> = input.chars().collect();
    let mut brace_count = 0i32;
    let mut paren_count = 0i32;
    let mut in_string = false;
    let mut in_block_comment = false;
    let mut last = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if in_block_comment {
            if c == '*' && next == Some('/') {
                in_block_comment = false;
                i += 1;
            }
        } else if in_string {
            if c == '"' {
                in_string = false;
                last = Some(c);
            }
        } else if c == '/' && next == Some('/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        } else if c == '/' && next == Some('*') {
            in_block_comment = true;
            i += 1;
        } else {
            match c {
                '"' => in_string = true,
                '{' => brace_count += 1,
                '}' => brace_count -= 1,
                '(' => paren_count += 1,
                ')' => paren_count -= 1,
                _ => {}
            }
            if !c.is_whitespace() {
                last = Some(c);
            }
        }
        i += 1;
    }

    brace_count <= 0
        && paren_count <= 0
        && !in_string
        && !in_block_comment
        && matches!(last, Some(';') | Some('}'))
}
