use serde_json::Value;

use crate::{
    ast::expressions::{Expression, FunctionCall, Place},
    errors::errors::Error,
    MK_ERROR,
};

use super::{
    lookups::{BINARY_OPERATOR_LOOKUP, EXPR_LOOKUP, PLACE_LOOKUP, UNARY_OPERATOR_LOOKUP},
    parser::{expect_array, expect_object, expect_tagged, expect_tuple, field, malformed},
    types::{parse_identifier, parse_type},
};

pub fn parse_expr(json: &Value) -> Result<Expression, Error> {
    if json.as_str() == Some("Nil") {
        return Ok(Expression::Nil);
    }

    let (tag, payload) = expect_tagged(json, "expression", |tag| {
        PLACE_LOOKUP.contains_key(tag) || EXPR_LOOKUP.contains_key(tag)
    })?;

    // Place tags may appear directly where an expression is expected and
    // then mean reading that place.
    if let Some(handler) = PLACE_LOOKUP.get(tag) {
        return Ok(Expression::Value(handler(payload)?));
    }

    match EXPR_LOOKUP.get(tag) {
        Some(handler) => handler(payload),
        None => Err(MK_ERROR!(UnknownTag {
            kind: String::from("expression"),
            tag: String::from(tag)
        })),
    }
}

pub fn parse_place(json: &Value) -> Result<Place, Error> {
    let (tag, payload) = expect_tagged(json, "place", |tag| PLACE_LOOKUP.contains_key(tag))?;

    match PLACE_LOOKUP.get(tag) {
        Some(handler) => handler(payload),
        None => Err(MK_ERROR!(UnknownTag {
            kind: String::from("place"),
            tag: String::from(tag)
        })),
    }
}

pub fn parse_function_call(json: &Value) -> Result<FunctionCall, Error> {
    let object = expect_object(json, "call")?;

    Ok(FunctionCall {
        callee: Box::new(parse_expr(field(object, "call", "callee")?)?),
        arguments: expect_array(field(object, "call", "args")?, "call", "args")?
            .iter()
            .map(parse_expr)
            .collect::<Result<_, _>>()?,
    })
}

// Places

pub fn parse_identifier_place(json: &Value) -> Result<Place, Error> {
    Ok(Place::Identifier(parse_identifier(json)?))
}

pub fn parse_dereference_place(json: &Value) -> Result<Place, Error> {
    Ok(Place::Dereference(Box::new(parse_expr(json)?)))
}

pub fn parse_array_access_place(json: &Value) -> Result<Place, Error> {
    let object = expect_object(json, "array access")?;

    Ok(Place::ArrayAccess {
        array: Box::new(parse_expr(field(object, "array access", "array")?)?),
        index: Box::new(parse_expr(field(object, "array access", "idx")?)?),
    })
}

pub fn parse_field_access_place(json: &Value) -> Result<Place, Error> {
    let object = expect_object(json, "field access")?;

    Ok(Place::FieldAccess {
        pointer: Box::new(parse_expr(field(object, "field access", "ptr")?)?),
        field: parse_identifier(field(object, "field access", "field")?)?,
    })
}

// Expressions

pub fn parse_value_expr(json: &Value) -> Result<Expression, Error> {
    Ok(Expression::Value(parse_place(json)?))
}

pub fn parse_number_expr(json: &Value) -> Result<Expression, Error> {
    json.as_i64()
        .map(Expression::Number)
        .ok_or_else(|| malformed("number", &format!("expected a 64-bit integer, found {}", json)))
}

pub fn parse_nil_expr(_json: &Value) -> Result<Expression, Error> {
    Ok(Expression::Nil)
}

pub fn parse_select_expr(json: &Value) -> Result<Expression, Error> {
    let object = expect_object(json, "select")?;

    Ok(Expression::Select {
        guard: Box::new(parse_expr(field(object, "select", "guard")?)?),
        tt: Box::new(parse_expr(field(object, "select", "tt")?)?),
        ff: Box::new(parse_expr(field(object, "select", "ff")?)?),
    })
}

pub fn parse_unary_expr(json: &Value) -> Result<Expression, Error> {
    let [operator, operand] = expect_tuple::<2>(json, "unary operation")?;

    let operator = operator
        .as_str()
        .ok_or_else(|| malformed("unary operation", "operator name must be a string"))?;

    Ok(Expression::UnaryOperation {
        operator: *UNARY_OPERATOR_LOOKUP.get(operator).ok_or_else(|| {
            MK_ERROR!(UnknownTag {
                kind: String::from("unary operator"),
                tag: String::from(operator)
            })
        })?,
        operand: Box::new(parse_expr(operand)?),
    })
}

pub fn parse_binary_expr(json: &Value) -> Result<Expression, Error> {
    let object = expect_object(json, "binary operation")?;

    let operator = field(object, "binary operation", "op")?
        .as_str()
        .ok_or_else(|| malformed("binary operation", "operator name must be a string"))?;

    Ok(Expression::BinaryOperation {
        operator: *BINARY_OPERATOR_LOOKUP.get(operator).ok_or_else(|| {
            MK_ERROR!(UnknownTag {
                kind: String::from("binary operator"),
                tag: String::from(operator)
            })
        })?,
        lhs: Box::new(parse_expr(field(object, "binary operation", "left")?)?),
        rhs: Box::new(parse_expr(field(object, "binary operation", "right")?)?),
    })
}

pub fn parse_new_singleton_expr(json: &Value) -> Result<Expression, Error> {
    Ok(Expression::NewSingleton(parse_type(json)?))
}

pub fn parse_new_array_expr(json: &Value) -> Result<Expression, Error> {
    let [element_type, size] = expect_tuple::<2>(json, "array allocation")?;

    Ok(Expression::NewArray {
        element_type: parse_type(element_type)?,
        size: Box::new(parse_expr(size)?),
    })
}

pub fn parse_call_expr(json: &Value) -> Result<Expression, Error> {
    Ok(Expression::Call(parse_function_call(json)?))
}
