use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    ast::{ast::Declaration, types::Type},
    errors::errors::Error,
    MK_ERROR,
};

use super::{
    lookups::IDENTIFIER,
    parser::{expect_array, expect_object, expect_tuple, field, malformed},
};

const TYPE_TAGS: [&str; 4] = ["Struct", "Ptr", "Array", "Fn"];

/// Decodes a type through its serde representation, then validates every
/// struct name it mentions.
pub fn parse_type(json: &Value) -> Result<Type, Error> {
    let ty = Type::deserialize(canonical_type(json)?).map_err(|error| malformed("type", &error.to_string()))?;
    validate_type_names(&ty)?;
    Ok(ty)
}

/// Rewrites a type node into the single-key shape serde expects, dropping
/// unrelated keys and resolving the `{"kind": "Int"}` spelling.
fn canonical_type(json: &Value) -> Result<Value, Error> {
    let object = match json {
        Value::Object(object) => object,
        other => return Ok(other.clone()),
    };

    let Some((tag, payload)) = object.iter().find(|(tag, _)| TYPE_TAGS.contains(&tag.as_str())) else {
        return match object.get("kind").and_then(Value::as_str) {
            Some(kind @ ("Int" | "Nil")) => Ok(Value::from(kind)),
            _ => Err(malformed("type", &format!("expected a type, found {}", json))),
        };
    };

    let payload = match tag.as_str() {
        "Ptr" | "Array" => canonical_type(payload)?,
        "Fn" => {
            let [params, return_type] = expect_tuple::<2>(payload, "function type")?;
            let params = expect_array(params, "function type", "parameters")?
                .iter()
                .map(canonical_type)
                .collect::<Result<Vec<_>, _>>()?;
            Value::Array(vec![Value::Array(params), canonical_type(return_type)?])
        }
        _ => payload.clone(),
    };

    let mut canonical = Map::new();
    canonical.insert(tag.clone(), payload);
    Ok(Value::Object(canonical))
}

pub fn parse_declaration(json: &Value) -> Result<Declaration, Error> {
    let object = expect_object(json, "declaration")?;

    Ok(Declaration {
        name: parse_identifier(field(object, "declaration", "name")?)?,
        ty: parse_type(field(object, "declaration", "typ")?)?,
    })
}

/// A JSON string holding a valid identifier.
pub fn parse_identifier(json: &Value) -> Result<String, Error> {
    let name = json
        .as_str()
        .ok_or_else(|| malformed("identifier", &format!("expected a string, found {}", json)))?;
    validate_identifier(name)?;
    Ok(String::from(name))
}

pub fn validate_identifier(name: &str) -> Result<(), Error> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(MK_ERROR!(InvalidIdentifier {
            name: String::from(name)
        }))
    }
}

fn validate_type_names(ty: &Type) -> Result<(), Error> {
    match ty {
        Type::Int | Type::Nil => Ok(()),
        Type::Struct(name) => validate_identifier(name),
        Type::Array(inner) | Type::Pointer(inner) => validate_type_names(inner),
        Type::Function(params, return_type) => {
            for param in params {
                validate_type_names(param)?;
            }
            validate_type_names(return_type)
        }
    }
}
