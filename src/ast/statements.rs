use std::fmt::{self, Display};

use super::expressions::{Expression, FunctionCall, Place};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A sequence; also the shape of every function body.
    Statements(Vec<Statement>),
    Assignment(Place, Expression),
    Call(FunctionCall),
    If {
        guard: Expression,
        happy_path: Box<Statement>,
        unhappy_path: Option<Box<Statement>>,
    },
    While {
        guard: Expression,
        body: Box<Statement>,
    },
    Break,
    Continue,
    /// `None` is a bare `return;`, which never type checks.
    Return(Option<Expression>),
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Statements(statements) => {
                write!(f, "Stmts([")?;
                for (i, statement) in statements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", statement)?;
                }
                write!(f, "])")
            }
            Statement::Assignment(place, expression) => write!(f, "Assign({}, {})", place, expression),
            Statement::Call(call) => write!(f, "{}", call),
            Statement::If {
                guard,
                happy_path,
                unhappy_path,
            } => {
                write!(f, "If {{ guard: {}, tt: {}", guard, happy_path)?;
                match unhappy_path {
                    Some(unhappy_path) => write!(f, ", ff: {} }}", unhappy_path),
                    None => write!(f, " }}"),
                }
            }
            Statement::While { guard, body } => write!(f, "While({}, {})", guard, body),
            Statement::Break => write!(f, "Break"),
            Statement::Continue => write!(f, "Continue"),
            Statement::Return(Some(expression)) => write!(f, "Return({})", expression),
            Statement::Return(None) => write!(f, "Return"),
        }
    }
}
