use std::fmt::Display;

use thiserror::Error;

use crate::Location;

#[derive(Error, Debug, Clone)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    location: Location,
}

/// The two failure classes a caller can observe. Internal faults never
/// surface as an `Error`; the binary reports them separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The input could not be read or decoded into a program.
    Input,
    /// The program was decoded but is not well-typed.
    Semantic,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, location: Location) -> Self {
        Error {
            internal_error: error_impl,
            location,
        }
    }

    /// Attaches a location, unless a more specific one is already set.
    pub fn locate(mut self, location: Location) -> Self {
        if self.location == Location::Unknown {
            self.location = location;
        }
        self
    }

    pub fn get_location(&self) -> &Location {
        &self.location
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_class(&self) -> ErrorClass {
        match &self.internal_error {
            ErrorImpl::Io { .. }
            | ErrorImpl::InvalidJson { .. }
            | ErrorImpl::MalformedNode { .. }
            | ErrorImpl::UnknownTag { .. }
            | ErrorImpl::InvalidIdentifier { .. } => ErrorClass::Input,
            _ => ErrorClass::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::Io { .. } => "Io",
            ErrorImpl::InvalidJson { .. } => "InvalidJson",
            ErrorImpl::MalformedNode { .. } => "MalformedNode",
            ErrorImpl::UnknownTag { .. } => "UnknownTag",
            ErrorImpl::InvalidIdentifier { .. } => "InvalidIdentifier",
            ErrorImpl::UnboundIdentifier { .. } => "UnboundIdentifier",
            ErrorImpl::NonIntGuard { .. } => "NonIntGuard",
            ErrorImpl::IncompatibleSelectBranches { .. } => "IncompatibleSelectBranches",
            ErrorImpl::NonIntUnaryOperand { .. } => "NonIntUnaryOperand",
            ErrorImpl::IncompatibleOperands { .. } => "IncompatibleOperands",
            ErrorImpl::IncomparableOperand { .. } => "IncomparableOperand",
            ErrorImpl::NonIntLeftOperand { .. } => "NonIntLeftOperand",
            ErrorImpl::NonIntRightOperand { .. } => "NonIntRightOperand",
            ErrorImpl::InvalidAllocation { .. } => "InvalidAllocation",
            ErrorImpl::InvalidArrayAllocation { .. } => "InvalidArrayAllocation",
            ErrorImpl::NonIntArraySize { .. } => "NonIntArraySize",
            ErrorImpl::NonPointerDereference { .. } => "NonPointerDereference",
            ErrorImpl::NonIntIndex { .. } => "NonIntIndex",
            ErrorImpl::NonArrayAccess { .. } => "NonArrayAccess",
            ErrorImpl::NotAPointer { .. } => "NotAPointer",
            ErrorImpl::NotAStructPointer { .. } => "NotAStructPointer",
            ErrorImpl::UnknownStruct { .. } => "UnknownStruct",
            ErrorImpl::UnknownField { .. } => "UnknownField",
            ErrorImpl::CallToMain => "CallToMain",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::AssignmentTypeMatchError { .. } => "AssignmentTypeMatchError",
            ErrorImpl::BreakOutsideLoop => "BreakOutsideLoop",
            ErrorImpl::ContinueOutsideLoop => "ContinueOutsideLoop",
            ErrorImpl::ReturnTypeMatchError { .. } => "ReturnTypeMatchError",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::EmptyStruct { .. } => "EmptyStruct",
            ErrorImpl::InvalidFieldType { .. } => "InvalidFieldType",
            ErrorImpl::FieldAlreadyDeclared { .. } => "FieldAlreadyDeclared",
            ErrorImpl::InvalidVariableType { .. } => "InvalidVariableType",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::EmptyFunctionBody { .. } => "EmptyFunctionBody",
            ErrorImpl::MayNotReturn { .. } => "MayNotReturn",
            ErrorImpl::NameAlreadyDeclared { .. } => "NameAlreadyDeclared",
            ErrorImpl::MainWrongType => "MainWrongType",
            ErrorImpl::MissingMain => "MissingMain",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidAllocation { .. } => ErrorTip::Suggestion(String::from(
                "only storable types and structs can be allocated with `new`",
            )),
            ErrorImpl::InvalidArrayAllocation { .. } => ErrorTip::Suggestion(String::from(
                "arrays hold ints, pointers or arrays; store structs behind a pointer",
            )),
            ErrorImpl::NotAStructPointer { .. } | ErrorImpl::NotAPointer { .. } => {
                ErrorTip::Suggestion(String::from("fields are only reachable through a struct pointer"))
            }
            ErrorImpl::InvalidFieldType { .. } | ErrorImpl::InvalidVariableType { .. } => {
                ErrorTip::Suggestion(String::from(
                    "nil, struct and function types must be wrapped in a pointer",
                ))
            }
            ErrorImpl::MayNotReturn { .. } => ErrorTip::Suggestion(String::from(
                "every path must end in `return`; an `if` needs an `else` and a `while` may not run at all",
            )),
            ErrorImpl::MissingReturnValue { .. } => {
                ErrorTip::Suggestion(String::from("the language has no void type"))
            }
            ErrorImpl::BreakOutsideLoop | ErrorImpl::ContinueOutsideLoop => {
                ErrorTip::Suggestion(String::from("only valid inside the body of a `while`"))
            }
            _ => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Every diagnostic the crate can produce.
///
/// Types are rendered in their source-like form and AST nodes in their
/// debug form, so each message names both the construct and the types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Input
    #[error("could not read {path}: {message}")]
    Io { path: String, message: String },
    #[error("invalid JSON: {message}")]
    InvalidJson { message: String },
    #[error("malformed {kind} node: {message}")]
    MalformedNode { kind: String, message: String },
    #[error("unknown {kind} tag {tag:?}")]
    UnknownTag { kind: String, tag: String },
    #[error("{name:?} is not a valid identifier")]
    InvalidIdentifier { name: String },

    // Expressions and places
    #[error("id {name} does not exist in this scope")]
    UnboundIdentifier { name: String },
    #[error("non-int type {ty} for {construct} guard '{guard}'")]
    NonIntGuard { construct: String, ty: String, guard: String },
    #[error("incompatible types {tt_type} vs {ff_type} in select branches '{tt}' vs '{ff}'")]
    IncompatibleSelectBranches { tt_type: String, ff_type: String, tt: String, ff: String },
    #[error("non-int operand type {ty} in unary op '{expr}'")]
    NonIntUnaryOperand { ty: String, expr: String },
    #[error("incompatible types {lhs_type} vs {rhs_type} in binary op '{expr}'")]
    IncompatibleOperands { lhs_type: String, rhs_type: String, expr: String },
    #[error("invalid type {ty} used in binary op '{expr}'")]
    IncomparableOperand { ty: String, expr: String },
    #[error("non-int type {ty} for left operand of binary op '{expr}'")]
    NonIntLeftOperand { ty: String, expr: String },
    #[error("non-int type {ty} for right operand of binary op '{expr}'")]
    NonIntRightOperand { ty: String, expr: String },
    #[error("invalid type {ty} used for allocation '{expr}'")]
    InvalidAllocation { ty: String, expr: String },
    #[error("invalid element type {ty} used for array allocation '{expr}'")]
    InvalidArrayAllocation { ty: String, expr: String },
    #[error("non-int type {ty} used for size of array allocation '{expr}'")]
    NonIntArraySize { ty: String, expr: String },
    #[error("non-pointer type {ty} for dereference '{expr}'")]
    NonPointerDereference { ty: String, expr: String },
    #[error("non-int index type {ty} for array access '{expr}'")]
    NonIntIndex { ty: String, expr: String },
    #[error("non-array type {ty} for array access '{expr}'")]
    NonArrayAccess { ty: String, expr: String },
    #[error("{ty} is not a struct pointer type in field access '{expr}'")]
    NotAPointer { ty: String, expr: String },
    #[error("pointer type {ty} does not point to a struct in field access '{expr}'")]
    NotAStructPointer { ty: String, expr: String },
    #[error("non-existent struct type {name} in field access '{expr}'")]
    UnknownStruct { name: String, expr: String },
    #[error("non-existent field {struct_name}::{field} in field access '{expr}'")]
    UnknownField { struct_name: String, field: String, expr: String },

    // Calls
    #[error("trying to call 'main'")]
    CallToMain,
    #[error("trying to call type {ty} as function pointer in call '{call}'")]
    NotCallable { ty: String, call: String },
    #[error("incorrect number of arguments ({received} vs {expected}) in call '{call}'")]
    ArgumentCountMismatch { expected: usize, received: usize, call: String },
    #[error("incompatible argument type {received} vs parameter type {expected} for argument '{argument}' in call '{call}'")]
    ArgumentTypeMatchError { expected: String, received: String, argument: String, call: String },

    // Statements
    #[error("invalid type {ty} for left-hand side of assignment '{assignment}'")]
    InvalidAssignmentTarget { ty: String, assignment: String },
    #[error("incompatible types {lhs_type} vs {rhs_type} for assignment '{assignment}'")]
    AssignmentTypeMatchError { lhs_type: String, rhs_type: String, assignment: String },
    #[error("break outside loop")]
    BreakOutsideLoop,
    #[error("continue outside loop")]
    ContinueOutsideLoop,
    #[error("incompatible return type {received} for 'return {expr}', should be {expected}")]
    ReturnTypeMatchError { expected: String, received: String, expr: String },
    #[error("missing return expression, function returns {expected}")]
    MissingReturnValue { expected: String },

    // Top level
    #[error("empty struct {name}")]
    EmptyStruct { name: String },
    #[error("invalid type {ty} for struct field {struct_name}::{field}")]
    InvalidFieldType { ty: String, struct_name: String, field: String },
    #[error("duplicate field name '{field}' in struct '{struct_name}'")]
    FieldAlreadyDeclared { struct_name: String, field: String },
    #[error("invalid type {ty} for variable {variable} in function {function}")]
    InvalidVariableType { ty: String, variable: String, function: String },
    #[error("duplicate parameter/local name '{variable}' in function '{function}'")]
    VariableAlreadyDeclared { variable: String, function: String },
    #[error("function {function} has an empty body")]
    EmptyFunctionBody { function: String },
    #[error("function {function} may not execute a return")]
    MayNotReturn { function: String },
    #[error("duplicate name: {name}")]
    NameAlreadyDeclared { name: String },
    #[error("function 'main' exists but has wrong type, should be '() -> int'")]
    MainWrongType,
    #[error("no 'main' function with type '() -> int' exists")]
    MissingMain,
}
