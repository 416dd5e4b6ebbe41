use serde_json::Value;

use crate::{ast::statements::Statement, errors::errors::Error, MK_ERROR};

use super::{
    expr::{parse_expr, parse_function_call, parse_place},
    lookups::STMT_LOOKUP,
    parser::{expect_array, expect_object, expect_tagged, expect_tuple, field},
};

pub fn parse_stmt(json: &Value) -> Result<Statement, Error> {
    match json {
        Value::Array(_) => return parse_statements_stmt(json),
        Value::String(tag) => {
            return match tag.as_str() {
                "Break" => Ok(Statement::Break),
                "Continue" => Ok(Statement::Continue),
                _ => Err(MK_ERROR!(UnknownTag {
                    kind: String::from("statement"),
                    tag: tag.clone()
                })),
            }
        }
        _ => {}
    }

    let (tag, payload) = expect_tagged(json, "statement", |tag| STMT_LOOKUP.contains_key(tag))?;

    match STMT_LOOKUP.get(tag) {
        Some(handler) => handler(payload),
        None => Err(MK_ERROR!(UnknownTag {
            kind: String::from("statement"),
            tag: String::from(tag)
        })),
    }
}

pub fn parse_statements_stmt(json: &Value) -> Result<Statement, Error> {
    Ok(Statement::Statements(
        expect_array(json, "statements", "Stmts")?
            .iter()
            .map(parse_stmt)
            .collect::<Result<_, _>>()?,
    ))
}

pub fn parse_assignment_stmt(json: &Value) -> Result<Statement, Error> {
    let [place, expression] = expect_tuple::<2>(json, "assignment")?;

    Ok(Statement::Assignment(parse_place(place)?, parse_expr(expression)?))
}

pub fn parse_call_stmt(json: &Value) -> Result<Statement, Error> {
    Ok(Statement::Call(parse_function_call(json)?))
}

pub fn parse_if_stmt(json: &Value) -> Result<Statement, Error> {
    let object = expect_object(json, "if")?;

    // A missing, null or empty else branch all mean "no else".
    let unhappy_path = match object.get("ff") {
        None | Some(Value::Null) => None,
        Some(Value::Array(statements)) if statements.is_empty() => None,
        Some(ff) => Some(Box::new(parse_stmt(ff)?)),
    };

    Ok(Statement::If {
        guard: parse_expr(field(object, "if", "guard")?)?,
        happy_path: Box::new(parse_stmt(field(object, "if", "tt")?)?),
        unhappy_path,
    })
}

pub fn parse_while_stmt(json: &Value) -> Result<Statement, Error> {
    let [guard, body] = expect_tuple::<2>(json, "while")?;

    Ok(Statement::While {
        guard: parse_expr(guard)?,
        body: Box::new(parse_stmt(body)?),
    })
}

pub fn parse_return_stmt(json: &Value) -> Result<Statement, Error> {
    match json {
        Value::Null => Ok(Statement::Return(None)),
        expression => Ok(Statement::Return(Some(parse_expr(expression)?))),
    }
}
