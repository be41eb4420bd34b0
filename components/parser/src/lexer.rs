//! Lexer - tokenizes source code into tokens

use crate::error::lexical_error;
use core_types::{Diagnostic, SourcePosition};
use serde::{Serialize, Serializer};
use std::fmt;

/// Identifiers longer than this are truncated (with a diagnostic)
pub const MAX_IDENTIFIER_LEN: usize = 32;

/// Token kinds (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input sentinel
    Eof,

    /// Integer literal
    IntLiteral,
    /// Decimal literal
    DoubleLiteral,
    /// String literal
    StringLiteral,
    /// Identifier
    Identifier,

    /// long keyword
    Long,
    /// double keyword
    Double,
    /// if keyword
    If,
    /// then keyword
    Then,
    /// else keyword
    Else,
    /// while keyword
    While,
    /// break keyword
    Break,
    /// read keyword
    Read,
    /// write keyword
    Write,
    /// true keyword
    True,
    /// false keyword
    False,

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    GtEq,
    /// `<=`
    LtEq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<>`
    LtGt,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Bang,

    /// `=`
    Assign,
    /// `+=`
    PlusEq,
    /// `-=`
    MinusEq,
    /// `*=`
    StarEq,
    /// `/=`
    SlashEq,

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
}

impl TokenKind {
    /// Look up a reserved word
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "long" => TokenKind::Long,
            "double" => TokenKind::Double,
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "break" => TokenKind::Break,
            "read" => TokenKind::Read,
            "write" => TokenKind::Write,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return None,
        };
        Some(kind)
    }

    /// Upper-case name used when rendering tokens
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::IntLiteral => "INT_LITERAL",
            TokenKind::DoubleLiteral => "DOUBLE_LITERAL",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Long => "KW_LONG",
            TokenKind::Double => "KW_DOUBLE",
            TokenKind::If => "KW_IF",
            TokenKind::Then => "KW_THEN",
            TokenKind::Else => "KW_ELSE",
            TokenKind::While => "KW_WHILE",
            TokenKind::Break => "KW_BREAK",
            TokenKind::Read => "KW_READ",
            TokenKind::Write => "KW_WRITE",
            TokenKind::True => "KW_TRUE",
            TokenKind::False => "KW_FALSE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Gt => "GT",
            TokenKind::Lt => "LT",
            TokenKind::GtEq => "GTE",
            TokenKind::LtEq => "LTE",
            TokenKind::EqEq => "EQEQ",
            TokenKind::NotEq => "NEQ",
            TokenKind::LtGt => "NEQ_ALT",
            TokenKind::AndAnd => "ANDAND",
            TokenKind::OrOr => "OROR",
            TokenKind::Bang => "BANG",
            TokenKind::Assign => "EQUAL",
            TokenKind::PlusEq => "PLUS_EQ",
            TokenKind::MinusEq => "MINUS_EQ",
            TokenKind::StarEq => "STAR_EQ",
            TokenKind::SlashEq => "SLASH_EQ",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
        }
    }

    /// Whether this kind starts a variable declaration
    pub fn is_type_keyword(self) -> bool {
        matches!(self, TokenKind::Long | TokenKind::Double)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Source text of the token (string contents without quotes)
    pub lexeme: String,
    /// Where the token starts
    pub position: SourcePosition,
}

impl Token {
    /// Create a token
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}') @ {}", self.kind, self.lexeme, self.position)
    }
}

/// Scan `source` into a token list terminated by exactly one EOF token,
/// plus every lexical diagnostic found along the way.
pub fn scan(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    Lexer::new(source).tokenize()
}

/// Lexer for source code
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    errors: Vec<Diagnostic>,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            errors: Vec::new(),
        }
    }

    /// Consume the whole source
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        (tokens, self.errors)
    }

    /// Get the next token from the source.
    ///
    /// Characters that cannot start a token are reported and skipped, so this
    /// always returns a real token or EOF. Once the input is exhausted every
    /// call returns EOF.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace_and_comments();

            if self.is_at_end() {
                return Token::new(TokenKind::Eof, "", self.current_position());
            }

            if let Some(token) = self.scan_token() {
                return token;
            }
        }
    }

    /// Diagnostics recorded so far
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    fn scan_token(&mut self) -> Option<Token> {
        let start = self.current_position();
        let ch = self.advance();

        if ch.is_alphabetic() || ch == '_' {
            return Some(self.scan_identifier(ch, start));
        }
        if ch.is_ascii_digit() {
            return Some(self.scan_number(ch, start));
        }

        let kind = match ch {
            '"' => return self.scan_string(start),

            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,

            '+' => self.with_eq(TokenKind::PlusEq, TokenKind::Plus),
            '-' => self.with_eq(TokenKind::MinusEq, TokenKind::Minus),
            '*' => self.with_eq(TokenKind::StarEq, TokenKind::Star),
            '/' => self.with_eq(TokenKind::SlashEq, TokenKind::Slash),
            '=' => self.with_eq(TokenKind::EqEq, TokenKind::Assign),
            '!' => self.with_eq(TokenKind::NotEq, TokenKind::Bang),
            '>' => self.with_eq(TokenKind::GtEq, TokenKind::Gt),
            '<' => {
                if self.match_char('=') {
                    TokenKind::LtEq
                } else if self.match_char('>') {
                    TokenKind::LtGt
                } else {
                    TokenKind::Lt
                }
            }

            '&' => {
                if !self.match_char('&') {
                    self.error("Unexpected character '&' (did you mean '&&'?)", start);
                    return None;
                }
                TokenKind::AndAnd
            }
            '|' => {
                if !self.match_char('|') {
                    self.error("Unexpected character '|' (did you mean '||'?)", start);
                    return None;
                }
                TokenKind::OrOr
            }

            other => {
                self.error(
                    format!("Invalid character: '{}'", printable(other)),
                    start,
                );
                return None;
            }
        };

        Some(Token::new(kind, self.lexeme_from(start), start))
    }

    /// `op=` when the next character is `=`, otherwise `op`
    fn with_eq(&mut self, compound: TokenKind, simple: TokenKind) -> TokenKind {
        if self.match_char('=') {
            compound
        } else {
            simple
        }
    }

    fn scan_identifier(&mut self, first: char, start: SourcePosition) -> Token {
        let mut name = String::new();
        name.push(first);
        while !self.is_at_end() && (self.peek().is_alphanumeric() || self.peek() == '_') {
            name.push(self.advance());
        }

        if let Some(keyword) = TokenKind::keyword(&name) {
            return Token::new(keyword, name, start);
        }

        if name.chars().count() > MAX_IDENTIFIER_LEN {
            self.error(
                format!(
                    "Identifier exceeds maximum length ({})",
                    MAX_IDENTIFIER_LEN
                ),
                start,
            );
            name = name.chars().take(MAX_IDENTIFIER_LEN).collect();
        }
        Token::new(TokenKind::Identifier, name, start)
    }

    fn scan_number(&mut self, first: char, start: SourcePosition) -> Token {
        let mut digits = String::new();
        digits.push(first);
        self.scan_decimal_digits(&mut digits);

        // A '.' only belongs to the number when a digit follows it
        let is_decimal = self.peek() == '.' && self.peek_next().is_some_and(|c| c.is_ascii_digit());
        if is_decimal {
            digits.push(self.advance());
            self.scan_decimal_digits(&mut digits);
            Token::new(TokenKind::DoubleLiteral, digits, start)
        } else {
            Token::new(TokenKind::IntLiteral, digits, start)
        }
    }

    fn scan_decimal_digits(&mut self, digits: &mut String) {
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            digits.push(self.advance());
        }
    }

    fn scan_string(&mut self, start: SourcePosition) -> Option<Token> {
        let mut value = String::new();

        while !self.is_at_end() && self.peek() != '"' {
            let ch = self.advance();
            if ch == '\n' {
                self.error("Unterminated string on the same line", start);
            }
            value.push(ch);
        }

        if self.is_at_end() {
            self.error("Unterminated string literal (missing closing quote)", start);
            return None;
        }

        self.advance(); // closing quote
        Some(Token::new(TokenKind::StringLiteral, value, start))
    }

    fn skip_whitespace_and_comments(&mut self) {
        while !self.is_at_end() {
            match self.peek() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    // Line comment; the newline is left for the whitespace arm
                    while !self.is_at_end() && self.peek() != '\n' {
                        self.advance();
                    }
                }
                '/' if self.peek_next() == Some('*') => {
                    let start = self.current_position();
                    self.advance(); // /
                    self.advance(); // *
                    let mut found_end = false;
                    while !self.is_at_end() {
                        if self.peek() == '*' && self.peek_next() == Some('/') {
                            self.advance(); // *
                            self.advance(); // /
                            found_end = true;
                            break;
                        }
                        self.advance();
                    }
                    if !found_end {
                        self.error("Unterminated multi-line comment", start);
                    }
                }
                _ => break,
            }
        }
    }

    fn error(&mut self, message: impl Into<String>, position: SourcePosition) {
        self.errors.push(lexical_error(message, position));
    }

    fn lexeme_from(&self, start: SourcePosition) -> String {
        // Operators never span lines, so the column distance is the length
        let len = (self.column - start.column) as usize;
        self.chars[self.position - len..self.position].iter().collect()
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn peek(&self) -> char {
        self.chars.get(self.position).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.position];
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.position] != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    fn current_position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column)
    }
}

/// Spell out line breaks and tabs in diagnostics; anything else prints as is
fn printable(ch: char) -> String {
    match ch {
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        other => other.to_string(),
    }
}
