//! Type system definitions for the AST.
//!
//! This module defines the closed set of types in the language:
//!
//! - Primitive types (`int`, `nil`)
//! - Composite types (structs, arrays, pointers, functions)
//! - The Nil-coercive equality relation used by the type checker
//! - Debug and source-like renderings used in diagnostics
//!
//! Types are plain values. Recursive payloads are boxed, so a `Type` is
//! cheap to clone and never mutated after it has been built.

use std::fmt::{self, Display};

use serde::Deserialize;

/// A type in the language.
///
/// The derived `PartialEq` is exact structural identity. The type checker
/// never uses it to compare types: it uses [`types_equal`], which also lets
/// `nil` stand in for any pointer or array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub enum Type {
    Int,
    Nil,
    Struct(String),
    Array(Box<Type>),
    #[serde(rename = "Ptr")]
    Pointer(Box<Type>),
    #[serde(rename = "Fn")]
    Function(Vec<Type>, Box<Type>),
}

impl Type {
    pub fn pointer(pointee: Type) -> Self {
        Type::Pointer(Box::new(pointee))
    }

    pub fn array(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    pub fn function(params: Vec<Type>, return_type: Type) -> Self {
        Type::Function(params, Box::new(return_type))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Type::Int)
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Type::Nil)
    }

    /// Whether a value of this type can live in a variable, field or array
    /// slot. Structs and functions are only reachable through pointers, and
    /// `nil` is not a type anything can be declared with.
    pub fn is_storable(&self) -> bool {
        !matches!(self, Type::Nil | Type::Struct(_) | Type::Function(..))
    }

    /// The function signature behind a callee type, if there is one.
    /// Both bare function types (externs) and pointers to functions
    /// (user functions) are callable.
    pub fn as_callable(&self) -> Option<(&[Type], &Type)> {
        match self {
            Type::Function(params, return_type) => Some((params, return_type)),
            Type::Pointer(pointee) => match pointee.as_ref() {
                Type::Function(params, return_type) => Some((params, return_type)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Fully qualified form, e.g. `Ptr(Struct("Node"))`.
    pub fn to_debug_string(&self) -> String {
        match self {
            Type::Int => String::from("Int"),
            Type::Nil => String::from("Nil"),
            Type::Struct(name) => format!("Struct({:?})", name),
            Type::Array(element) => format!("Array({})", element.to_debug_string()),
            Type::Pointer(pointee) => format!("Ptr({})", pointee.to_debug_string()),
            Type::Function(params, return_type) => format!(
                "Fn([{}], {})",
                params
                    .iter()
                    .map(Type::to_debug_string)
                    .collect::<Vec<String>>()
                    .join(", "),
                return_type.to_debug_string()
            ),
        }
    }
}

/// Source-like form, e.g. `&Node` or `(int, [int]) -> &Node`.
impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Nil => write!(f, "nil"),
            Type::Struct(name) => write!(f, "{}", name),
            Type::Array(element) => write!(f, "[{}]", element),
            Type::Pointer(pointee) => write!(f, "&{}", pointee),
            Type::Function(params, return_type) => {
                write!(f, "(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") -> {}", return_type)
            }
        }
    }
}

/// The type equality used everywhere in checking.
///
/// `nil` is compatible with itself and with every pointer and array type,
/// from either side. Every other pair must agree on the variant and,
/// recursively, on the structure.
pub fn types_equal(lhs: &Type, rhs: &Type) -> bool {
    match (lhs, rhs) {
        (Type::Nil, Type::Nil | Type::Pointer(_) | Type::Array(_)) => true,
        (Type::Pointer(_) | Type::Array(_), Type::Nil) => true,
        (Type::Int, Type::Int) => true,
        (Type::Struct(lhs), Type::Struct(rhs)) => lhs == rhs,
        (Type::Array(lhs), Type::Array(rhs)) => types_equal(lhs, rhs),
        (Type::Pointer(lhs), Type::Pointer(rhs)) => types_equal(lhs, rhs),
        (Type::Function(lhs_params, lhs_ret), Type::Function(rhs_params, rhs_ret)) => {
            lhs_params.len() == rhs_params.len()
                && lhs_params
                    .iter()
                    .zip(rhs_params.iter())
                    .all(|(lhs, rhs)| types_equal(lhs, rhs))
                && types_equal(lhs_ret, rhs_ret)
        }
        _ => false,
    }
}

/// Picks the more informative of two types already known to be equal:
/// whichever one is not `nil`, or `nil` if both are.
pub fn pick_non_nil<'a>(lhs: &'a Type, rhs: &'a Type) -> &'a Type {
    if lhs.is_nil() {
        rhs
    } else {
        lhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Type> {
        vec![
            Type::Int,
            Type::Nil,
            Type::Struct(String::from("Node")),
            Type::Struct(String::from("List")),
            Type::array(Type::Int),
            Type::array(Type::pointer(Type::Struct(String::from("Node")))),
            Type::pointer(Type::Int),
            Type::pointer(Type::Struct(String::from("Node"))),
            Type::pointer(Type::function(vec![Type::Int], Type::Int)),
            Type::function(vec![], Type::Int),
            Type::function(vec![Type::Int, Type::array(Type::Int)], Type::Int),
        ]
    }

    #[test]
    fn test_equality_is_reflexive_and_symmetric() {
        let types = samples();
        for a in types.iter() {
            assert!(types_equal(a, a), "{} should equal itself", a);
            for b in types.iter() {
                assert_eq!(types_equal(a, b), types_equal(b, a), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_nil_coerces_to_pointers_and_arrays_only() {
        for ty in samples() {
            let expected = matches!(ty, Type::Nil | Type::Pointer(_) | Type::Array(_));
            assert_eq!(types_equal(&Type::Nil, &ty), expected, "nil vs {}", ty);
            assert_eq!(types_equal(&ty, &Type::Nil), expected, "{} vs nil", ty);
        }
    }

    #[test]
    fn test_nested_nil_coerces_to_pointers_only() {
        let lhs = Type::pointer(Type::Nil);
        let rhs = Type::pointer(Type::pointer(Type::Int));
        assert!(types_equal(&lhs, &rhs));
        assert!(!types_equal(&Type::pointer(Type::Nil), &Type::pointer(Type::Int)));
    }

    #[test]
    fn test_function_equality_compares_arity_params_and_return() {
        let f = Type::function(vec![Type::Int], Type::Int);
        assert!(!types_equal(&f, &Type::function(vec![], Type::Int)));
        assert!(!types_equal(&f, &Type::function(vec![Type::pointer(Type::Int)], Type::Int)));
        assert!(!types_equal(&f, &Type::function(vec![Type::Int], Type::pointer(Type::Int))));
        assert!(types_equal(&f, &Type::function(vec![Type::Int], Type::Int)));
    }

    #[test]
    fn test_struct_equality_is_nominal() {
        let node = Type::Struct(String::from("Node"));
        assert!(types_equal(&node, &Type::Struct(String::from("Node"))));
        assert!(!types_equal(&node, &Type::Struct(String::from("List"))));
    }

    #[test]
    fn test_pick_non_nil() {
        let ptr = Type::pointer(Type::Int);
        assert_eq!(pick_non_nil(&Type::Nil, &ptr), &ptr);
        assert_eq!(pick_non_nil(&ptr, &Type::Nil), &ptr);
        assert_eq!(pick_non_nil(&Type::Nil, &Type::Nil), &Type::Nil);
    }

    #[test]
    fn test_renderings() {
        let ty = Type::pointer(Type::function(
            vec![Type::Int, Type::array(Type::pointer(Type::Struct(String::from("Node"))))],
            Type::Nil,
        ));
        assert_eq!(ty.to_string(), "&(int, [&Node]) -> nil");
        assert_eq!(
            ty.to_debug_string(),
            "Ptr(Fn([Int, Array(Ptr(Struct(\"Node\")))], Nil))"
        );
        assert_eq!(Type::function(vec![], Type::Int).to_string(), "() -> int");
    }

    #[test]
    fn test_deserialize_wire_shapes() {
        let ty: Type = serde_json::from_str(r#"{"Ptr": {"Fn": [["Int", {"Array": "Int"}], {"Struct": "Node"}]}}"#)
            .unwrap();
        assert_eq!(
            ty,
            Type::pointer(Type::function(
                vec![Type::Int, Type::array(Type::Int)],
                Type::Struct(String::from("Node"))
            ))
        );
        assert!(serde_json::from_str::<Type>(r#""Bool""#).is_err());
    }
}
