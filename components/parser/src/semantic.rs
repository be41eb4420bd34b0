//! Semantic analysis: type checking and name resolution over the AST.
//!
//! The analyzer walks statements depth-first in program order against the
//! single global [`SymbolTable`]. It never adds or removes symbols; the only
//! thing it writes is each symbol's tracked literal value.
//!
//! [`Type::Invalid`] marks an expression that already produced an error. Any
//! rule that sees it yields `Invalid` again without reporting, so one mistake
//! is reported once.

use crate::ast::*;
use crate::error::semantic_error;
use core_types::{DataType, Diagnostic, SourcePosition, SymbolTable};
use std::fmt;

/// Type of an expression as seen by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// Integer (`long` variables, integer literals)
    Integer,
    /// Decimal (`double` variables, decimal literals)
    Decimal,
    /// String literal
    Text,
    /// Comparison or logical result, `true`/`false`
    Boolean,
    /// Result of an expression that already failed to type-check
    Invalid,
}

impl Type {
    /// Integer or Decimal
    pub fn is_numeric(self) -> bool {
        matches!(self, Type::Integer | Type::Decimal)
    }

    /// Type of a variable declared with `data_type`
    pub fn of_declared(data_type: DataType) -> Self {
        match data_type {
            DataType::Long => Type::Integer,
            DataType::Double => Type::Decimal,
        }
    }

    fn of_literal(kind: LiteralKind) -> Self {
        match kind {
            LiteralKind::Integer => Type::Integer,
            LiteralKind::Decimal => Type::Decimal,
            LiteralKind::Text => Type::Text,
            LiteralKind::True | LiteralKind::False => Type::Boolean,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Integer => "INTEGER",
            Type::Decimal => "DECIMAL",
            Type::Text => "TEXT",
            Type::Boolean => "BOOLEAN",
            Type::Invalid => "INVALID",
        };
        f.write_str(name)
    }
}

/// Whether a value of type `value` may be stored in a variable of `target`
pub fn is_assignable(target: DataType, value: Type) -> bool {
    match target {
        DataType::Long => value == Type::Integer,
        DataType::Double => value.is_numeric(),
    }
}

/// Analyze `statements`, updating symbol values in `table`
pub fn analyze(statements: &[Statement], table: &mut SymbolTable) -> Vec<Diagnostic> {
    let mut analyzer = SemanticAnalyzer::new(table);
    analyzer.analyze(statements);
    analyzer.into_errors()
}

/// Type checker over a statement list
pub struct SemanticAnalyzer<'a> {
    table: &'a mut SymbolTable,
    loop_depth: usize,
    errors: Vec<Diagnostic>,
}

impl<'a> SemanticAnalyzer<'a> {
    /// Create an analyzer writing symbol values into `table`
    pub fn new(table: &'a mut SymbolTable) -> Self {
        Self {
            table,
            loop_depth: 0,
            errors: Vec::new(),
        }
    }

    /// Analyze statements in order
    pub fn analyze(&mut self, statements: &[Statement]) {
        for stmt in statements {
            self.visit_statement(stmt);
        }
    }

    /// Errors reported so far
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Consume the analyzer, returning its errors
    pub fn into_errors(self) -> Vec<Diagnostic> {
        self.errors
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Assignment {
                name,
                value,
                position,
            } => self.visit_assignment(name, value, *position),

            Statement::Read { name, position } => {
                self.declared_type(name, *position);
            }

            Statement::Write { value, .. } => {
                self.type_of(value);
            }

            Statement::Block { body, .. } => self.analyze(body),

            Statement::If {
                condition,
                then_branch,
                else_branch,
                position,
            } => {
                self.check_condition("if", condition, *position);
                if let Some(branch) = then_branch {
                    self.visit_statement(branch);
                }
                if let Some(branch) = else_branch {
                    self.visit_statement(branch);
                }
            }

            Statement::While {
                condition,
                body,
                position,
            } => {
                self.check_condition("while", condition, *position);
                self.loop_depth += 1;
                if let Some(body) = body {
                    self.visit_statement(body);
                }
                self.loop_depth -= 1;
            }

            Statement::Break { position } => {
                if self.loop_depth == 0 {
                    self.error("'break' can only be used inside a 'while'", *position);
                }
            }
        }
    }

    fn visit_assignment(&mut self, name: &str, value: &Expression, position: SourcePosition) {
        let target = self.declared_type(name, position);
        let value_type = self.type_of(value);

        let Some(target) = target else {
            return;
        };

        if value_type == Type::Invalid {
            self.table.set_value(name, None);
            return;
        }

        if !is_assignable(target, value_type) {
            self.error(
                format!(
                    "Incompatible types in assignment: variable '{}' is {} but the expression is {}",
                    name, target, value_type
                ),
                position,
            );
            self.table.set_value(name, None);
            return;
        }

        self.table.set_value(name, tracked_literal(target, value));
    }

    fn check_condition(&mut self, keyword: &str, condition: &Expression, position: SourcePosition) {
        let condition_type = self.type_of(condition);
        if condition_type != Type::Boolean && condition_type != Type::Invalid {
            self.error(
                format!(
                    "The '{}' condition must be boolean or a comparison (got: {})",
                    keyword, condition_type
                ),
                position,
            );
        }
    }

    /// Declared type of `name`, reporting it when undeclared
    fn declared_type(&mut self, name: &str, position: SourcePosition) -> Option<DataType> {
        match self.table.get(name) {
            Some(symbol) => Some(symbol.data_type),
            None => {
                self.error(format!("Undeclared identifier '{}'", name), position);
                None
            }
        }
    }

    /// Compute the type of an expression, reporting the first error at each node
    pub fn type_of(&mut self, expr: &Expression) -> Type {
        match expr {
            Expression::Literal { kind, .. } => Type::of_literal(*kind),

            Expression::Variable { name, position } => self
                .declared_type(name, *position)
                .map(Type::of_declared)
                .unwrap_or(Type::Invalid),

            Expression::Grouping { inner, .. } => self.type_of(inner),

            Expression::Unary {
                operator,
                operand,
                position,
            } => {
                let operand = self.type_of(operand);
                self.unary_type(*operator, operand, *position)
            }

            Expression::Binary {
                operator,
                left,
                right,
                position,
            } => {
                let left = self.type_of(left);
                let right = self.type_of(right);
                self.binary_type(*operator, left, right, *position)
            }
        }
    }

    fn unary_type(&mut self, operator: UnaryOperator, operand: Type, position: SourcePosition) -> Type {
        if operand == Type::Invalid {
            return Type::Invalid;
        }

        match operator {
            UnaryOperator::Not => {
                if operand == Type::Boolean || operand.is_numeric() {
                    Type::Boolean
                } else {
                    self.error(format!("Operator '!' is not valid on type {}", operand), position);
                    Type::Invalid
                }
            }
            UnaryOperator::Minus => {
                if operand.is_numeric() {
                    operand
                } else {
                    self.error(
                        format!("Unary operator '-' requires a numeric operand (got {})", operand),
                        position,
                    );
                    Type::Invalid
                }
            }
        }
    }

    fn binary_type(
        &mut self,
        operator: BinaryOperator,
        left: Type,
        right: Type,
        position: SourcePosition,
    ) -> Type {
        if left == Type::Invalid || right == Type::Invalid {
            return Type::Invalid;
        }

        if operator.is_logical() {
            if left == Type::Boolean && right == Type::Boolean {
                return Type::Boolean;
            }
            self.error(
                format!(
                    "Logical operator requires booleans: {} {} {}",
                    left,
                    operator.symbol(),
                    right
                ),
                position,
            );
            return Type::Invalid;
        }

        if operator.is_comparison() {
            if (left.is_numeric() && right.is_numeric()) || left == right {
                return Type::Boolean;
            }
            self.error(
                format!("Comparison between incompatible types: {} and {}", left, right),
                position,
            );
            return Type::Invalid;
        }

        if left.is_numeric() && right.is_numeric() {
            if left == Type::Decimal || right == Type::Decimal {
                Type::Decimal
            } else {
                Type::Integer
            }
        } else {
            self.error(
                format!("Arithmetic operation on non-numeric types: {} and {}", left, right),
                position,
            );
            Type::Invalid
        }
    }

    fn error(&mut self, message: impl Into<String>, position: SourcePosition) {
        self.errors.push(semantic_error(message, position));
    }
}

/// Literal text an assignment leaves in a variable of type `target`, if any.
///
/// Only a literal (or a literal inside one pair of parentheses) whose kind
/// fits the declared type is tracked.
fn tracked_literal(target: DataType, value: &Expression) -> Option<String> {
    let value = match value {
        Expression::Grouping { inner, .. } => inner.as_ref(),
        other => other,
    };

    match (value, target) {
        (
            Expression::Literal {
                value,
                kind: LiteralKind::Integer,
                ..
            },
            DataType::Long | DataType::Double,
        )
        | (
            Expression::Literal {
                value,
                kind: LiteralKind::Decimal,
                ..
            },
            DataType::Double,
        ) => Some(value.clone()),
        _ => None,
    }
}
