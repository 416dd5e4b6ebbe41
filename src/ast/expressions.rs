//! Expression, place and call nodes.
//!
//! Each family is a closed enum; the checker matches on every variant.
//! `Display` renders the debug form used inside diagnostics, which mirrors
//! the tags of the input format (`Val(Id("x"))`, `BinOp { .. }`, ...).

use std::fmt::{self, Display};

use super::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl BinaryOperator {
    /// `Eq` and `NotEq` compare any two equal non-struct, non-function
    /// types; every other operator works on ints only.
    pub fn is_equality(&self) -> bool {
        matches!(self, BinaryOperator::Eq | BinaryOperator::NotEq)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Value(Place),
    Number(i64),
    Nil,
    Select {
        guard: Box<Expression>,
        tt: Box<Expression>,
        ff: Box<Expression>,
    },
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    BinaryOperation {
        operator: BinaryOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    NewSingleton(Type),
    NewArray {
        element_type: Type,
        size: Box<Expression>,
    },
    Call(FunctionCall),
}

/// An addressable location.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    Identifier(String),
    Dereference(Box<Expression>),
    ArrayAccess {
        array: Box<Expression>,
        index: Box<Expression>,
    },
    FieldAccess {
        pointer: Box<Expression>,
        field: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl FunctionCall {
    /// The name the callee refers to, when the callee is a plain
    /// identifier read (`Val(Id(name))`).
    pub fn callee_name(&self) -> Option<&str> {
        match self.callee.as_ref() {
            Expression::Value(Place::Identifier(name)) => Some(name),
            _ => None,
        }
    }
}

impl Expression {
    pub fn identifier(name: &str) -> Self {
        Expression::Value(Place::Identifier(String::from(name)))
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Value(place) => write!(f, "Val({})", place),
            Expression::Number(value) => write!(f, "{}", value),
            Expression::Nil => write!(f, "Nil"),
            Expression::Select { guard, tt, ff } => {
                write!(f, "Select {{ guard: {}, tt: {}, ff: {} }}", guard, tt, ff)
            }
            Expression::UnaryOperation { operator, operand } => {
                write!(f, "UnOp({:?}, {})", operator, operand)
            }
            Expression::BinaryOperation { operator, lhs, rhs } => write!(
                f,
                "BinOp {{ op: {:?}, left: {}, right: {} }}",
                operator, lhs, rhs
            ),
            Expression::NewSingleton(ty) => write!(f, "NewSingle({})", ty.to_debug_string()),
            Expression::NewArray { element_type, size } => {
                write!(f, "NewArray({}, {})", element_type.to_debug_string(), size)
            }
            Expression::Call(call) => write!(f, "{}", call),
        }
    }
}

impl Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::Identifier(name) => write!(f, "Id({:?})", name),
            Place::Dereference(pointer) => write!(f, "Deref({})", pointer),
            Place::ArrayAccess { array, index } => {
                write!(f, "ArrayAccess {{ array: {}, idx: {} }}", array, index)
            }
            Place::FieldAccess { pointer, field } => {
                write!(f, "FieldAccess {{ ptr: {}, field: {:?} }}", pointer, field)
            }
        }
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Call {{ callee: {}, args: [", self.callee)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", argument)?;
        }
        write!(f, "] }}")
    }
}
