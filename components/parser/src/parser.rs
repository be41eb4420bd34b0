//! Recursive descent parser (second pass over the token list).
//!
//! Builds the statement list while recording syntax errors. Parsing never
//! stops early: a missing token is reported and replaced by a zero-width
//! placeholder, an unparseable expression by an empty string literal, so the
//! tree handed to the semantic analyzer is always complete. Every path through
//! the statement loop consumes at least one token.
//!
//! Nesting is bounded. Parentheses, unary operators and nested statements
//! may go [`MAX_NESTING_DEPTH`] levels deep and an expression tree may be
//! [`MAX_EXPRESSION_HEIGHT`] nodes tall. Past either limit one error is
//! recorded and the over-deep region is skipped, which keeps every later
//! walk over the tree (analysis, rendering, serialization) shallow.

use crate::ast::*;
use crate::error::syntax_error;
use crate::lexer::{Token, TokenKind};
use core_types::{Diagnostic, SourcePosition};

/// Deepest nesting of parentheses, unary operators and statements
pub const MAX_NESTING_DEPTH: usize = 128;

/// Tallest expression tree accepted; long operator chains count too
pub const MAX_EXPRESSION_HEIGHT: usize = 512;

/// Parse `tokens` into a statement list plus syntax errors
pub fn parse(tokens: &[Token]) -> (Vec<Statement>, Vec<Diagnostic>) {
    Parser::new(tokens).parse()
}

/// Parser over a scanned token list
pub struct Parser<'t> {
    tokens: &'t [Token],
    current: usize,
    errors: Vec<Diagnostic>,
    depth: usize,
    /// Stands in for a missing EOF sentinel so lookahead is always defined
    eof: Token,
}

impl<'t> Parser<'t> {
    /// Create a new parser for the given tokens
    pub fn new(tokens: &'t [Token]) -> Self {
        let eof_position = tokens
            .last()
            .map(|t| t.position)
            .unwrap_or_default();
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
            depth: 0,
            eof: Token::new(TokenKind::Eof, "", eof_position),
        }
    }

    /// Parse the whole token list
    pub fn parse(mut self) -> (Vec<Statement>, Vec<Diagnostic>) {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            self.parse_list_item(&mut statements);
        }
        (statements, self.errors)
    }

    /// One item of a statement list: a declaration (skipped) or a statement
    fn parse_list_item(&mut self, statements: &mut Vec<Statement>) {
        if self.peek().kind.is_type_keyword() {
            self.skip_declaration();
        } else if let Some(stmt) = self.parse_statement() {
            statements.push(stmt);
        }
    }

    /// Advance past a declaration the collector already registered.
    ///
    /// Mirrors the collector's grammar and resynchronization but reports
    /// nothing: those diagnostics belong to the collector.
    fn skip_declaration(&mut self) {
        self.advance(); // long / double
        loop {
            if !self.check(TokenKind::Identifier) {
                self.synchronize();
                return;
            }
            self.advance();

            if self.match_kind(TokenKind::Comma) {
                continue;
            }
            if !self.match_kind(TokenKind::Semicolon) {
                self.synchronize();
            }
            return;
        }
    }

    /// Skip to just past the next `;`, or to EOF
    fn synchronize(&mut self) {
        while !self.is_at_end() && !self.check(TokenKind::Semicolon) {
            self.advance();
        }
        self.match_kind(TokenKind::Semicolon);
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        if !self.enter() {
            let position = self.current_position();
            self.errors
                .push(syntax_error("Statements nested too deeply", position));
            self.skip_nested();
            // The closing '}' belongs to the enclosing block
            if !self.check(TokenKind::RBrace) {
                self.advance();
            }
            return None;
        }

        let statement = self.parse_statement_kind();
        self.leave();
        statement
    }

    fn parse_statement_kind(&mut self) -> Option<Statement> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::If => Some(self.parse_if_statement()),
            TokenKind::While => Some(self.parse_while_statement()),
            TokenKind::Break => Some(self.parse_break_statement()),
            TokenKind::LBrace => Some(self.parse_block_statement()),
            TokenKind::Read => Some(self.parse_read_statement()),
            TokenKind::Write => Some(self.parse_write_statement()),
            TokenKind::Identifier if self.next_is_assignment_operator() => {
                Some(self.parse_assignment())
            }
            _ => {
                self.error_at(
                    &token,
                    "Expected a statement: 'if', 'while', 'break', '{', 'read', 'write' or an assignment 'id = expr;'",
                );
                self.advance();
                None
            }
        }
    }

    fn next_is_assignment_operator(&self) -> bool {
        matches!(
            self.peek_next().map(|t| t.kind),
            Some(
                TokenKind::Assign
                    | TokenKind::PlusEq
                    | TokenKind::MinusEq
                    | TokenKind::StarEq
                    | TokenKind::SlashEq
            )
        )
    }

    fn parse_if_statement(&mut self) -> Statement {
        let keyword = self.advance();
        self.expect(TokenKind::LParen, "Expected '(' after 'if'");
        let condition = self.parse_expression();
        self.expect(TokenKind::RParen, "Expected ')' after 'if' condition");

        // A missing 'then' is reported but the branch is still parsed
        if !self.match_kind(TokenKind::Then) {
            let token = self.peek().clone();
            self.error_at(&token, "Expected 'then' after 'if (condition)'");
        }

        let then_branch = self.parse_statement().map(Box::new);
        let else_branch = if self.match_kind(TokenKind::Else) {
            self.parse_statement().map(Box::new)
        } else {
            None
        };

        Statement::If {
            condition,
            then_branch,
            else_branch,
            position: keyword.position,
        }
    }

    fn parse_while_statement(&mut self) -> Statement {
        let keyword = self.advance();
        self.expect(TokenKind::LParen, "Expected '(' after 'while'");
        let condition = self.parse_expression();
        self.expect(TokenKind::RParen, "Expected ')' after 'while' condition");
        let body = self.parse_statement().map(Box::new);

        Statement::While {
            condition,
            body,
            position: keyword.position,
        }
    }

    fn parse_break_statement(&mut self) -> Statement {
        let keyword = self.advance();
        self.expect(TokenKind::Semicolon, "Expected ';' after 'break'");
        Statement::Break {
            position: keyword.position,
        }
    }

    fn parse_block_statement(&mut self) -> Statement {
        let brace = self.advance();
        let mut body = Vec::new();
        while !self.is_at_end() && !self.check(TokenKind::RBrace) {
            self.parse_list_item(&mut body);
        }
        self.expect(TokenKind::RBrace, "Expected '}' to close the block");

        Statement::Block {
            body,
            position: brace.position,
        }
    }

    fn parse_read_statement(&mut self) -> Statement {
        let keyword = self.advance();
        self.expect(TokenKind::LParen, "Expected '(' after 'read'");
        let name = self.expect(TokenKind::Identifier, "Expected an identifier inside read(...)");
        self.expect(TokenKind::RParen, "Expected ')' after identifier in read(...)");
        self.expect(TokenKind::Semicolon, "Expected ';' after read(...)");

        Statement::Read {
            name: name.lexeme,
            position: keyword.position,
        }
    }

    fn parse_write_statement(&mut self) -> Statement {
        let keyword = self.advance();
        self.expect(TokenKind::LParen, "Expected '(' after 'write'");
        let value = self.parse_expression();
        self.expect(TokenKind::RParen, "Expected ')' after expression in write(...)");
        self.expect(TokenKind::Semicolon, "Expected ';' after write(...)");

        Statement::Write {
            value,
            position: keyword.position,
        }
    }

    /// `name = expr;` or `name op= expr;`, the latter desugared to
    /// `name = name op expr`
    fn parse_assignment(&mut self) -> Statement {
        let target = self.advance();
        let operator = self.advance();
        let right = self.parse_expression();

        let value = match BinaryOperator::from_compound_assignment(operator.kind) {
            Some(op) => {
                self.expect(
                    TokenKind::Semicolon,
                    "Expected ';' at the end of the compound assignment",
                );
                Expression::Binary {
                    operator: op,
                    left: Box::new(Expression::Variable {
                        name: target.lexeme.clone(),
                        position: target.position,
                    }),
                    right: Box::new(right),
                    position: operator.position,
                }
            }
            None => {
                self.expect(TokenKind::Semicolon, "Expected ';' at the end of the assignment");
                right
            }
        };

        Statement::Assignment {
            name: target.lexeme,
            value,
            position: target.position,
        }
    }

    fn parse_expression(&mut self) -> Expression {
        self.parse_logical_or_expression().expr
    }

    /// One left-associative binary precedence level
    fn parse_binary_level(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> Subtree,
    ) -> Subtree {
        let mut left = operand(self);

        loop {
            let kind = self.peek().kind;
            let operator = match BinaryOperator::from_token(kind) {
                Some(op) if operators.contains(&kind) => op,
                _ => break,
            };
            let token = self.advance();
            let right = operand(self);
            let height = left.height.max(right.height) + 1;
            left = self.node(
                Expression::Binary {
                    operator,
                    left: Box::new(left.expr),
                    right: Box::new(right.expr),
                    position: token.position,
                },
                height,
            );
        }

        left
    }

    fn parse_logical_or_expression(&mut self) -> Subtree {
        self.parse_binary_level(&[TokenKind::OrOr], Self::parse_logical_and_expression)
    }

    fn parse_logical_and_expression(&mut self) -> Subtree {
        self.parse_binary_level(&[TokenKind::AndAnd], Self::parse_equality_expression)
    }

    fn parse_equality_expression(&mut self) -> Subtree {
        self.parse_binary_level(
            &[TokenKind::EqEq, TokenKind::NotEq, TokenKind::LtGt],
            Self::parse_relational_expression,
        )
    }

    fn parse_relational_expression(&mut self) -> Subtree {
        self.parse_binary_level(
            &[TokenKind::Gt, TokenKind::Lt, TokenKind::GtEq, TokenKind::LtEq],
            Self::parse_additive_expression,
        )
    }

    fn parse_additive_expression(&mut self) -> Subtree {
        self.parse_binary_level(
            &[TokenKind::Plus, TokenKind::Minus],
            Self::parse_multiplicative_expression,
        )
    }

    fn parse_multiplicative_expression(&mut self) -> Subtree {
        self.parse_binary_level(
            &[TokenKind::Star, TokenKind::Slash],
            Self::parse_unary_expression,
        )
    }

    fn parse_unary_expression(&mut self) -> Subtree {
        let operator = match self.peek().kind {
            TokenKind::Bang => UnaryOperator::Not,
            TokenKind::Minus => UnaryOperator::Minus,
            _ => return self.parse_primary_expression(),
        };
        if !self.enter() {
            return self.expression_too_deep(self.current_position());
        }

        let token = self.advance();
        let operand = self.parse_unary_expression();
        self.leave();
        self.node(
            Expression::Unary {
                operator,
                operand: Box::new(operand.expr),
                position: token.position,
            },
            operand.height + 1,
        )
    }

    fn parse_primary_expression(&mut self) -> Subtree {
        let token = self.peek().clone();

        if let Some(kind) = LiteralKind::from_token(token.kind) {
            self.advance();
            return Subtree::leaf(Expression::Literal {
                value: token.lexeme,
                kind,
                position: token.position,
            });
        }

        match token.kind {
            TokenKind::Identifier => {
                self.advance();
                Subtree::leaf(Expression::Variable {
                    name: token.lexeme,
                    position: token.position,
                })
            }
            TokenKind::LParen => {
                if !self.enter() {
                    return self.expression_too_deep(token.position);
                }
                self.advance();
                let inner = self.parse_logical_or_expression();
                self.expect(TokenKind::RParen, "Expected ')' to close the expression");
                self.leave();
                self.node(
                    Expression::Grouping {
                        inner: Box::new(inner.expr),
                        position: token.position,
                    },
                    inner.height + 1,
                )
            }
            _ => {
                self.error_at(&token, "Invalid expression");
                Subtree::leaf(placeholder(token.position))
            }
        }
    }

    // ------------------------------------------------------------------
    // Nesting limits
    // ------------------------------------------------------------------

    /// Step one level deeper; false once the nesting limit is reached
    fn enter(&mut self) -> bool {
        if self.depth >= MAX_NESTING_DEPTH {
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Accept a freshly built node unless it makes the tree too tall
    fn node(&mut self, expr: Expression, height: usize) -> Subtree {
        if height > MAX_EXPRESSION_HEIGHT {
            return self.expression_too_deep(expr.position());
        }
        Subtree { expr, height }
    }

    /// Report an over-deep expression once and drop the rest of it
    fn expression_too_deep(&mut self, position: SourcePosition) -> Subtree {
        self.errors
            .push(syntax_error("Expression nested too deeply", position));
        self.skip_nested();
        Subtree::leaf(placeholder(position))
    }

    /// Skip to the `)`, `}` or `;` that closes the current level, leaving
    /// it unconsumed. Anything opened on the way is skipped with its closer.
    fn skip_nested(&mut self) {
        let mut open = 0usize;
        while !self.is_at_end() {
            match self.peek().kind {
                TokenKind::LParen | TokenKind::LBrace => open += 1,
                TokenKind::RParen | TokenKind::RBrace | TokenKind::Semicolon if open == 0 => {
                    return
                }
                TokenKind::RParen | TokenKind::RBrace => open -= 1,
                _ => {}
            }
            self.advance();
        }
    }

    // ------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------

    fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.current + 1)
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// Consume the current token; EOF is never consumed
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind`, or report `message` and return a
    /// zero-width placeholder of that kind at the current position
    fn expect(&mut self, kind: TokenKind, message: &str) -> Token {
        if self.check(kind) {
            return self.advance();
        }
        let position = self.current_position();
        self.errors.push(syntax_error(message, position));
        Token::new(kind, "", position)
    }

    fn current_position(&self) -> SourcePosition {
        self.peek().position
    }

    fn error_at(&mut self, token: &Token, message: &str) {
        self.errors.push(syntax_error(message, token.position));
    }
}

/// An expression together with the height of its tree
struct Subtree {
    expr: Expression,
    height: usize,
}

impl Subtree {
    fn leaf(expr: Expression) -> Self {
        Self { expr, height: 1 }
    }
}

/// Stand-in for an expression that could not be parsed
fn placeholder(position: SourcePosition) -> Expression {
    Expression::Literal {
        value: String::new(),
        kind: LiteralKind::Text,
        position,
    }
}
