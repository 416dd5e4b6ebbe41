use log::trace;

use crate::{
    ast::{
        expressions::{Expression, FunctionCall, Place},
        statements::Statement,
        types::{pick_non_nil, types_equal, Type},
    },
    errors::errors::Error,
    MK_ERROR,
};

use super::environment::{Delta, Gamma, MAIN};

/// The scope a single check traversal runs in.
#[derive(Debug)]
pub struct TypeChecker<'env> {
    pub gamma: Gamma,
    pub delta: &'env Delta,
}

impl<'env> TypeChecker<'env> {
    pub fn new(gamma: Gamma, delta: &'env Delta) -> Self {
        TypeChecker { gamma, delta }
    }

    pub fn fetch_variable_type(&self, name: &str) -> Option<&Type> {
        self.gamma.get(name)
    }
}

pub fn type_check_expr(type_checker: &TypeChecker, expr: &Expression) -> Result<Type, Error> {
    match expr {
        Expression::Value(place) => type_check_place(type_checker, place),
        Expression::Number(_) => Ok(Type::Int),
        Expression::Nil => Ok(Type::Nil),
        Expression::Select { guard, tt, ff } => {
            let guard_type = type_check_expr(type_checker, guard)?;
            if !guard_type.is_int() {
                return Err(MK_ERROR!(NonIntGuard {
                    construct: String::from("select"),
                    ty: guard_type.to_string(),
                    guard: guard.to_string()
                }));
            }

            let tt_type = type_check_expr(type_checker, tt)?;
            let ff_type = type_check_expr(type_checker, ff)?;
            if !types_equal(&tt_type, &ff_type) {
                return Err(MK_ERROR!(IncompatibleSelectBranches {
                    tt_type: tt_type.to_string(),
                    ff_type: ff_type.to_string(),
                    tt: tt.to_string(),
                    ff: ff.to_string()
                }));
            }

            Ok(pick_non_nil(&tt_type, &ff_type).clone())
        }
        Expression::UnaryOperation { operand, .. } => {
            let operand_type = type_check_expr(type_checker, operand)?;
            if !operand_type.is_int() {
                return Err(MK_ERROR!(NonIntUnaryOperand {
                    ty: operand_type.to_string(),
                    expr: expr.to_string()
                }));
            }
            Ok(Type::Int)
        }
        Expression::BinaryOperation { operator, lhs, rhs } => {
            let lhs_type = type_check_expr(type_checker, lhs)?;
            let rhs_type = type_check_expr(type_checker, rhs)?;

            if operator.is_equality() {
                if !types_equal(&lhs_type, &rhs_type) {
                    return Err(MK_ERROR!(IncompatibleOperands {
                        lhs_type: lhs_type.to_string(),
                        rhs_type: rhs_type.to_string(),
                        expr: expr.to_string()
                    }));
                }
                for operand_type in [&lhs_type, &rhs_type] {
                    if matches!(operand_type, Type::Struct(_) | Type::Function(..)) {
                        return Err(MK_ERROR!(IncomparableOperand {
                            ty: operand_type.to_string(),
                            expr: expr.to_string()
                        }));
                    }
                }
            } else {
                if !lhs_type.is_int() {
                    return Err(MK_ERROR!(NonIntLeftOperand {
                        ty: lhs_type.to_string(),
                        expr: expr.to_string()
                    }));
                }
                if !rhs_type.is_int() {
                    return Err(MK_ERROR!(NonIntRightOperand {
                        ty: rhs_type.to_string(),
                        expr: expr.to_string()
                    }));
                }
            }

            Ok(Type::Int)
        }
        Expression::NewSingleton(ty) => {
            if matches!(ty, Type::Nil | Type::Function(..)) {
                return Err(MK_ERROR!(InvalidAllocation {
                    ty: ty.to_string(),
                    expr: expr.to_string()
                }));
            }
            Ok(Type::pointer(ty.clone()))
        }
        Expression::NewArray { element_type, size } => {
            let size_type = type_check_expr(type_checker, size)?;
            if !size_type.is_int() {
                return Err(MK_ERROR!(NonIntArraySize {
                    ty: size_type.to_string(),
                    expr: expr.to_string()
                }));
            }
            if !element_type.is_storable() {
                return Err(MK_ERROR!(InvalidArrayAllocation {
                    ty: element_type.to_string(),
                    expr: expr.to_string()
                }));
            }
            Ok(Type::array(element_type.clone()))
        }
        Expression::Call(call) => type_check_call(type_checker, call),
    }
}

pub fn type_check_place(type_checker: &TypeChecker, place: &Place) -> Result<Type, Error> {
    match place {
        Place::Identifier(name) => match type_checker.fetch_variable_type(name) {
            Some(ty) => Ok(ty.clone()),
            None => Err(MK_ERROR!(UnboundIdentifier { name: name.clone() })),
        },
        Place::Dereference(pointer) => match type_check_expr(type_checker, pointer)? {
            Type::Pointer(pointee) => Ok(*pointee),
            other => Err(MK_ERROR!(NonPointerDereference {
                ty: other.to_string(),
                expr: place.to_string()
            })),
        },
        Place::ArrayAccess { array, index } => {
            let array_type = type_check_expr(type_checker, array)?;
            let index_type = type_check_expr(type_checker, index)?;

            if !index_type.is_int() {
                return Err(MK_ERROR!(NonIntIndex {
                    ty: index_type.to_string(),
                    expr: place.to_string()
                }));
            }

            // A nil array coerces to any array type but still has no element type.
            match array_type {
                Type::Array(element) => Ok(*element),
                other => Err(MK_ERROR!(NonArrayAccess {
                    ty: other.to_string(),
                    expr: place.to_string()
                })),
            }
        }
        Place::FieldAccess { pointer, field } => {
            let base_type = type_check_expr(type_checker, pointer)?;

            let pointee = match &base_type {
                Type::Pointer(pointee) => pointee.as_ref(),
                other => {
                    return Err(MK_ERROR!(NotAPointer {
                        ty: other.to_string(),
                        expr: place.to_string()
                    }))
                }
            };

            let struct_name = match pointee {
                Type::Struct(name) => name,
                _ => {
                    return Err(MK_ERROR!(NotAStructPointer {
                        ty: base_type.to_string(),
                        expr: place.to_string()
                    }))
                }
            };

            let fields = type_checker.delta.get(struct_name).ok_or_else(|| {
                MK_ERROR!(UnknownStruct {
                    name: struct_name.clone(),
                    expr: place.to_string()
                })
            })?;

            fields.get(field).cloned().ok_or_else(|| {
                MK_ERROR!(UnknownField {
                    struct_name: struct_name.clone(),
                    field: field.clone(),
                    expr: place.to_string()
                })
            })
        }
    }
}

pub fn type_check_call(type_checker: &TypeChecker, call: &FunctionCall) -> Result<Type, Error> {
    if call.callee_name() == Some(MAIN) {
        return Err(MK_ERROR!(CallToMain));
    }

    let callee_type = type_check_expr(type_checker, &call.callee)?;
    let (param_types, return_type) = callee_type.as_callable().ok_or_else(|| {
        MK_ERROR!(NotCallable {
            ty: callee_type.to_string(),
            call: call.to_string()
        })
    })?;

    if call.arguments.len() != param_types.len() {
        return Err(MK_ERROR!(ArgumentCountMismatch {
            expected: param_types.len(),
            received: call.arguments.len(),
            call: call.to_string()
        }));
    }

    for (argument, param_type) in call.arguments.iter().zip(param_types.iter()) {
        let argument_type = type_check_expr(type_checker, argument)?;
        if !types_equal(&argument_type, param_type) {
            return Err(MK_ERROR!(ArgumentTypeMatchError {
                expected: param_type.to_string(),
                received: argument_type.to_string(),
                argument: argument.to_string(),
                call: call.to_string()
            }));
        }
    }

    Ok(return_type.clone())
}

/// Checks a statement and reports whether every path through it reaches a
/// `return`.
pub fn type_check_stmt(
    type_checker: &TypeChecker,
    stmt: &Statement,
    return_type: &Type,
    in_loop: bool,
) -> Result<bool, Error> {
    let returns = match stmt {
        Statement::Statements(statements) => {
            // Code after a guaranteed return is still checked.
            let mut returns = false;
            for statement in statements {
                let statement_returns = type_check_stmt(type_checker, statement, return_type, in_loop)?;
                returns = returns || statement_returns;
            }
            returns
        }
        Statement::Assignment(place, expression) => {
            let lhs_type = type_check_place(type_checker, place)?;
            let rhs_type = type_check_expr(type_checker, expression)?;

            if !lhs_type.is_storable() {
                return Err(MK_ERROR!(InvalidAssignmentTarget {
                    ty: lhs_type.to_string(),
                    assignment: stmt.to_string()
                }));
            }
            if !types_equal(&lhs_type, &rhs_type) {
                return Err(MK_ERROR!(AssignmentTypeMatchError {
                    lhs_type: lhs_type.to_string(),
                    rhs_type: rhs_type.to_string(),
                    assignment: stmt.to_string()
                }));
            }
            false
        }
        Statement::Call(call) => {
            type_check_call(type_checker, call)?;
            false
        }
        Statement::If {
            guard,
            happy_path,
            unhappy_path,
        } => {
            type_check_guard(type_checker, "if", guard)?;

            let happy_path_returns = type_check_stmt(type_checker, happy_path, return_type, in_loop)?;
            let unhappy_path_returns = match unhappy_path {
                Some(unhappy_path) => type_check_stmt(type_checker, unhappy_path, return_type, in_loop)?,
                None => false,
            };
            happy_path_returns && unhappy_path_returns
        }
        Statement::While { guard, body } => {
            type_check_guard(type_checker, "while", guard)?;
            // The body may run zero times, so its result never propagates.
            type_check_stmt(type_checker, body, return_type, true)?;
            false
        }
        Statement::Break => {
            if !in_loop {
                return Err(MK_ERROR!(BreakOutsideLoop));
            }
            false
        }
        Statement::Continue => {
            if !in_loop {
                return Err(MK_ERROR!(ContinueOutsideLoop));
            }
            false
        }
        Statement::Return(Some(expression)) => {
            let expression_type = type_check_expr(type_checker, expression)?;
            if !types_equal(&expression_type, return_type) {
                return Err(MK_ERROR!(ReturnTypeMatchError {
                    expected: return_type.to_string(),
                    received: expression_type.to_string(),
                    expr: expression.to_string()
                }));
            }
            true
        }
        Statement::Return(None) => {
            return Err(MK_ERROR!(MissingReturnValue {
                expected: return_type.to_string()
            }));
        }
    };

    if !matches!(stmt, Statement::Statements(_)) {
        trace!("{} returns: {}", stmt, returns);
    }

    Ok(returns)
}

fn type_check_guard(type_checker: &TypeChecker, construct: &str, guard: &Expression) -> Result<(), Error> {
    let guard_type = type_check_expr(type_checker, guard)?;
    if !guard_type.is_int() {
        return Err(MK_ERROR!(NonIntGuard {
            construct: String::from(construct),
            ty: guard_type.to_string(),
            guard: guard.to_string()
        }));
    }
    Ok(())
}
