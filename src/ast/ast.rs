use std::fmt::{self, Display};

use super::{statements::Statement, types::Type};

/// A name bound to a type: a struct field, parameter or local.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub ty: Type,
}

impl Declaration {
    pub fn new(name: &str, ty: Type) -> Self {
        Declaration {
            name: String::from(name),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDefinition {
    pub name: String,
    pub fields: Vec<Declaration>,
}

/// A function with a signature but no body.
#[derive(Debug, Clone, PartialEq)]
pub struct Extern {
    pub name: String,
    pub param_types: Vec<Type>,
    pub return_type: Type,
}

impl Extern {
    pub fn get_type(&self) -> Type {
        Type::function(self.param_types.clone(), self.return_type.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub params: Vec<Declaration>,
    pub return_type: Type,
    pub locals: Vec<Declaration>,
    /// Always a `Statement::Statements` when built by the parser.
    pub body: Statement,
}

impl FunctionDefinition {
    /// The function's own signature, `(params) -> return_type`.
    pub fn get_type(&self) -> Type {
        Type::function(
            self.params.iter().map(|param| param.ty.clone()).collect(),
            self.return_type.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub structs: Vec<StructDefinition>,
    pub externs: Vec<Extern>,
    pub functions: Vec<FunctionDefinition>,
}

impl Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

fn write_declarations(f: &mut fmt::Formatter<'_>, declarations: &[Declaration]) -> fmt::Result {
    for (i, declaration) in declarations.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", declaration)?;
    }
    Ok(())
}

impl Display for StructDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "struct {} {{ ", self.name)?;
        write_declarations(f, &self.fields)?;
        write!(f, " }}")
    }
}

impl Display for Extern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "extern {}: {}", self.name, self.get_type())
    }
}

impl Display for FunctionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}(", self.name)?;
        write_declarations(f, &self.params)?;
        write!(f, ") -> {} {{ locals: [", self.return_type)?;
        write_declarations(f, &self.locals)?;
        write!(f, "], body: {} }}", self.body)
    }
}
