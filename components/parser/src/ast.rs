//! Abstract Syntax Tree node definitions
//!
//! Nodes are built once by the parser and only read afterwards. Every variant
//! carries the position of the token that introduced it.

use crate::lexer::TokenKind;
use core_types::SourcePosition;
use serde::Serialize;
use std::fmt;

/// Kind of a literal, taken from the token it was written as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LiteralKind {
    /// Integer literal
    Integer,
    /// Decimal literal
    Decimal,
    /// String literal
    Text,
    /// `true`
    True,
    /// `false`
    False,
}

impl LiteralKind {
    /// Literal kind for a token kind, if that token is a literal
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::IntLiteral => Some(LiteralKind::Integer),
            TokenKind::DoubleLiteral => Some(LiteralKind::Decimal),
            TokenKind::StringLiteral => Some(LiteralKind::Text),
            TokenKind::True => Some(LiteralKind::True),
            TokenKind::False => Some(LiteralKind::False),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            LiteralKind::Integer => "INT_LITERAL",
            LiteralKind::Decimal => "DOUBLE_LITERAL",
            LiteralKind::Text => "STRING_LITERAL",
            LiteralKind::True => "KW_TRUE",
            LiteralKind::False => "KW_FALSE",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    /// `!`
    Not,
    /// `-`
    Minus,
}

impl UnaryOperator {
    /// Source spelling
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Minus => "-",
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<>`
    LtGt,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    GtEq,
    /// `<=`
    LtEq,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl BinaryOperator {
    /// Operator for a binary operator token, if it is one
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::OrOr => BinaryOperator::Or,
            TokenKind::AndAnd => BinaryOperator::And,
            TokenKind::EqEq => BinaryOperator::Eq,
            TokenKind::NotEq => BinaryOperator::NotEq,
            TokenKind::LtGt => BinaryOperator::LtGt,
            TokenKind::Gt => BinaryOperator::Gt,
            TokenKind::Lt => BinaryOperator::Lt,
            TokenKind::GtEq => BinaryOperator::GtEq,
            TokenKind::LtEq => BinaryOperator::LtEq,
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Minus => BinaryOperator::Sub,
            TokenKind::Star => BinaryOperator::Mul,
            TokenKind::Slash => BinaryOperator::Div,
            _ => return None,
        };
        Some(op)
    }

    /// Arithmetic operator a compound assignment token stands for
    pub fn from_compound_assignment(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::PlusEq => Some(BinaryOperator::Add),
            TokenKind::MinusEq => Some(BinaryOperator::Sub),
            TokenKind::StarEq => Some(BinaryOperator::Mul),
            TokenKind::SlashEq => Some(BinaryOperator::Div),
            _ => None,
        }
    }

    /// Source spelling
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::Eq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::LtGt => "<>",
            BinaryOperator::Gt => ">",
            BinaryOperator::Lt => "<",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
        }
    }

    /// `&&` or `||`
    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }

    /// Equality or relational operator
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOperator::Eq
                | BinaryOperator::NotEq
                | BinaryOperator::LtGt
                | BinaryOperator::Gt
                | BinaryOperator::Lt
                | BinaryOperator::GtEq
                | BinaryOperator::LtEq
        )
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    /// Literal value, kept as source text
    Literal {
        /// Raw text (string contents without quotes)
        value: String,
        /// Literal kind
        kind: LiteralKind,
        /// Source location
        position: SourcePosition,
    },

    /// Variable reference
    Variable {
        /// Variable name
        name: String,
        /// Source location
        position: SourcePosition,
    },

    /// Parenthesized expression
    Grouping {
        /// Inner expression
        inner: Box<Expression>,
        /// Source location of `(`
        position: SourcePosition,
    },

    /// Unary operation
    Unary {
        /// Operator
        operator: UnaryOperator,
        /// Operand
        operand: Box<Expression>,
        /// Source location of the operator
        position: SourcePosition,
    },

    /// Binary operation
    Binary {
        /// Operator
        operator: BinaryOperator,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
        /// Source location of the operator
        position: SourcePosition,
    },
}

impl Expression {
    /// Source location of the node
    pub fn position(&self) -> SourcePosition {
        match self {
            Expression::Literal { position, .. }
            | Expression::Variable { position, .. }
            | Expression::Grouping { position, .. }
            | Expression::Unary { position, .. }
            | Expression::Binary { position, .. } => *position,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal { value, kind, .. } => {
                write!(f, "Literal({}:{})", kind.name(), value)
            }
            Expression::Variable { name, .. } => write!(f, "Var({})", name),
            Expression::Grouping { inner, .. } => write!(f, "Group({})", inner),
            Expression::Unary {
                operator, operand, ..
            } => write!(f, "Unary({} {})", operator.symbol(), operand),
            Expression::Binary {
                operator,
                left,
                right,
                ..
            } => write!(f, "Binary({} {} {})", left, operator.symbol(), right),
        }
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Statement {
    /// `name = value;` (compound assignments are desugared into this)
    Assignment {
        /// Target variable
        name: String,
        /// Assigned expression
        value: Expression,
        /// Source location of the target identifier
        position: SourcePosition,
    },

    /// `read(name);`
    Read {
        /// Target variable
        name: String,
        /// Source location
        position: SourcePosition,
    },

    /// `write(value);`
    Write {
        /// Written expression
        value: Expression,
        /// Source location
        position: SourcePosition,
    },

    /// `{ ... }`
    Block {
        /// Block body
        body: Vec<Statement>,
        /// Source location
        position: SourcePosition,
    },

    /// `if (condition) then ... else ...`
    If {
        /// Condition
        condition: Expression,
        /// Then branch, `None` when no statement could be parsed there
        then_branch: Option<Box<Statement>>,
        /// Else branch
        else_branch: Option<Box<Statement>>,
        /// Source location
        position: SourcePosition,
    },

    /// `while (condition) body`
    While {
        /// Loop condition
        condition: Expression,
        /// Loop body, `None` when no statement could be parsed there
        body: Option<Box<Statement>>,
        /// Source location
        position: SourcePosition,
    },

    /// `break;`
    Break {
        /// Source location
        position: SourcePosition,
    },
}

impl Statement {
    /// Source location of the node
    pub fn position(&self) -> SourcePosition {
        match self {
            Statement::Assignment { position, .. }
            | Statement::Read { position, .. }
            | Statement::Write { position, .. }
            | Statement::Block { position, .. }
            | Statement::If { position, .. }
            | Statement::While { position, .. }
            | Statement::Break { position } => *position,
        }
    }
}

struct OptionalStatement<'a>(&'a Option<Box<Statement>>);

impl fmt::Display for OptionalStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(stmt) => write!(f, "{}", stmt),
            None => f.write_str("none"),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Assignment { name, value, .. } => {
                write!(f, "Assignment({} = {})", name, value)
            }
            Statement::Read { name, .. } => write!(f, "Read({})", name),
            Statement::Write { value, .. } => write!(f, "Write({})", value),
            Statement::Block { body, .. } => {
                f.write_str("Block[")?;
                for (i, stmt) in body.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", stmt)?;
                }
                f.write_str("]")
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => write!(
                f,
                "If({}, then={}, else={})",
                condition,
                OptionalStatement(then_branch),
                OptionalStatement(else_branch)
            ),
            Statement::While {
                condition, body, ..
            } => write!(f, "While({}, {})", condition, OptionalStatement(body)),
            Statement::Break { .. } => f.write_str("Break"),
        }
    }
}
