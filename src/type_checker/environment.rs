//! Scope tables.
//!
//! - Gamma maps every visible identifier to its type.
//! - Delta maps every struct name to its field table.
//!
//! Both are built once from the program's top-level items. A function body
//! is checked against its own copy of Gamma extended with its parameters
//! and locals; Delta is shared by reference.

use std::collections::HashMap;

use crate::ast::{
    ast::{Declaration, Extern, FunctionDefinition, StructDefinition},
    types::Type,
};

pub const MAIN: &str = "main";

pub type Gamma = HashMap<String, Type>;
pub type FieldTable = HashMap<String, Type>;
pub type Delta = HashMap<String, FieldTable>;

/// Externs are bound as bare function types. User functions other than
/// `main` are bound as pointers to functions, which is how a named
/// function is used as a value.
pub fn construct_gamma(externs: &[Extern], functions: &[FunctionDefinition]) -> Gamma {
    let mut gamma = Gamma::new();

    for external in externs {
        gamma.insert(external.name.clone(), external.get_type());
    }

    for function in functions.iter().filter(|function| function.name != MAIN) {
        gamma.insert(function.name.clone(), Type::pointer(function.get_type()));
    }

    gamma
}

pub fn construct_delta(structs: &[StructDefinition]) -> Delta {
    structs
        .iter()
        .map(|definition| {
            let fields = definition
                .fields
                .iter()
                .map(|field| (field.name.clone(), field.ty.clone()))
                .collect::<FieldTable>();
            (definition.name.clone(), fields)
        })
        .collect()
}

/// A fresh copy of `gamma` with the function's parameters and locals bound.
/// Duplicate and ill-typed declarations are rejected by the caller first.
pub fn extend_gamma(gamma: &Gamma, declarations: &[&Declaration]) -> Gamma {
    let mut local_gamma = gamma.clone();

    for declaration in declarations {
        local_gamma.insert(declaration.name.clone(), declaration.ty.clone());
    }

    local_gamma
}
