//! Decoder entry points and shared JSON helpers.
//!
//! The decoder walks a `serde_json::Value` and builds the AST. Tagged nodes
//! are objects whose key selects a handler from the lookup tables in
//! `lookups`; every shape error becomes an input error, never a panic.

use serde_json::{Map, Value};

use crate::{
    ast::ast::{Extern, FunctionDefinition, Program, StructDefinition},
    ast::{statements::Statement, types::Type},
    errors::errors::Error,
    Location, MK_ERROR,
};

use super::{
    stmt::parse_stmt,
    types::{parse_declaration, parse_identifier, parse_type},
};

/// Decodes a whole program from JSON text.
pub fn parse(source: &str) -> Result<Program, Error> {
    let json: Value = serde_json::from_str(source).map_err(|error| {
        MK_ERROR!(InvalidJson {
            message: error.to_string()
        })
        .locate(Location::Input)
    })?;

    parse_value(&json)
}

pub fn parse_value(json: &Value) -> Result<Program, Error> {
    parse_program(json).map_err(|error| error.locate(Location::Input))
}

fn parse_program(json: &Value) -> Result<Program, Error> {
    let object = expect_object(json, "program")?;

    Ok(Program {
        structs: expect_array(field(object, "program", "structs")?, "program", "structs")?
            .iter()
            .map(parse_struct_definition)
            .collect::<Result<_, _>>()?,
        externs: expect_array(field(object, "program", "externs")?, "program", "externs")?
            .iter()
            .map(parse_extern)
            .collect::<Result<_, _>>()?,
        functions: expect_array(field(object, "program", "functions")?, "program", "functions")?
            .iter()
            .map(parse_function_definition)
            .collect::<Result<_, _>>()?,
    })
}

pub fn parse_struct_definition(json: &Value) -> Result<StructDefinition, Error> {
    let object = expect_object(json, "struct")?;

    Ok(StructDefinition {
        name: parse_identifier(field(object, "struct", "name")?)?,
        fields: expect_array(field(object, "struct", "fields")?, "struct", "fields")?
            .iter()
            .map(parse_declaration)
            .collect::<Result<_, _>>()?,
    })
}

pub fn parse_extern(json: &Value) -> Result<Extern, Error> {
    let object = expect_object(json, "extern")?;
    let name = parse_identifier(field(object, "extern", "name")?)?;

    match parse_type(field(object, "extern", "typ")?)? {
        Type::Function(param_types, return_type) => Ok(Extern {
            name,
            param_types,
            return_type: *return_type,
        }),
        other => Err(MK_ERROR!(MalformedNode {
            kind: String::from("extern"),
            message: format!("'typ' of {} must be a function type, found {}", name, other.to_debug_string())
        })),
    }
}

pub fn parse_function_definition(json: &Value) -> Result<FunctionDefinition, Error> {
    let object = expect_object(json, "function")?;

    let statements = expect_array(field(object, "function", "stmts")?, "function", "stmts")?
        .iter()
        .map(parse_stmt)
        .collect::<Result<Vec<Statement>, Error>>()?;

    Ok(FunctionDefinition {
        name: parse_identifier(field(object, "function", "name")?)?,
        params: expect_array(field(object, "function", "prms")?, "function", "prms")?
            .iter()
            .map(parse_declaration)
            .collect::<Result<_, _>>()?,
        return_type: parse_type(field(object, "function", "rettyp")?)?,
        locals: expect_array(field(object, "function", "locals")?, "function", "locals")?
            .iter()
            .map(parse_declaration)
            .collect::<Result<_, _>>()?,
        body: Statement::Statements(statements),
    })
}

pub fn malformed(kind: &str, message: &str) -> Error {
    MK_ERROR!(MalformedNode {
        kind: String::from(kind),
        message: String::from(message)
    })
}

pub fn expect_object<'a>(json: &'a Value, kind: &str) -> Result<&'a Map<String, Value>, Error> {
    json.as_object()
        .ok_or_else(|| malformed(kind, &format!("expected an object, found {}", json)))
}

pub fn expect_array<'a>(json: &'a Value, kind: &str, what: &str) -> Result<&'a Vec<Value>, Error> {
    json.as_array()
        .ok_or_else(|| malformed(kind, &format!("'{}' must be an array, found {}", what, json)))
}

/// An array of exactly `N` elements, as used by `[op, exp]`-style payloads.
pub fn expect_tuple<'a, const N: usize>(json: &'a Value, kind: &str) -> Result<&'a [Value; N], Error> {
    json.as_array()
        .and_then(|elements| <&[Value; N]>::try_from(elements.as_slice()).ok())
        .ok_or_else(|| malformed(kind, &format!("expected an array of {} elements, found {}", N, json)))
}

pub fn field<'a>(object: &'a Map<String, Value>, kind: &str, key: &str) -> Result<&'a Value, Error> {
    object
        .get(key)
        .ok_or_else(|| malformed(kind, &format!("missing '{}'", key)))
}

/// Splits a tagged node `{"Tag": payload}` using `is_known` to pick the
/// tag. Unknown extra keys are ignored.
pub fn expect_tagged<'a>(
    json: &'a Value,
    kind: &str,
    is_known: impl Fn(&str) -> bool,
) -> Result<(&'a str, &'a Value), Error> {
    let object = expect_object(json, kind)?;

    if let Some((tag, payload)) = object.iter().find(|(tag, _)| is_known(tag.as_str())) {
        return Ok((tag.as_str(), payload));
    }

    match object.keys().next() {
        Some(tag) => Err(MK_ERROR!(UnknownTag {
            kind: String::from(kind),
            tag: tag.clone()
        })),
        None => Err(malformed(kind, "expected a tagged object, found an empty object")),
    }
}
