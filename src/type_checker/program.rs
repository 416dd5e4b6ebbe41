//! Top-level validation: structs, functions and the program as a whole.

use std::collections::HashSet;

use log::debug;

use crate::{
    ast::{
        ast::{Declaration, FunctionDefinition, Program, StructDefinition},
        statements::Statement,
    },
    errors::errors::Error,
    Location, MK_ERROR,
};

use super::{
    environment::{construct_delta, construct_gamma, extend_gamma, Delta, Gamma, MAIN},
    type_checker::{type_check_stmt, TypeChecker},
};

pub fn type_check_struct(definition: &StructDefinition) -> Result<(), Error> {
    debug!("Checking struct `{}`", definition.name);

    if definition.fields.is_empty() {
        return Err(MK_ERROR!(EmptyStruct {
            name: definition.name.clone()
        }));
    }

    let mut field_names = HashSet::new();
    for field in definition.fields.iter() {
        if !field.ty.is_storable() {
            return Err(MK_ERROR!(InvalidFieldType {
                ty: field.ty.to_string(),
                struct_name: definition.name.clone(),
                field: field.name.clone()
            }));
        }
        if !field_names.insert(field.name.as_str()) {
            return Err(MK_ERROR!(FieldAlreadyDeclared {
                struct_name: definition.name.clone(),
                field: field.name.clone()
            }));
        }
    }

    Ok(())
}

pub fn type_check_function(function: &FunctionDefinition, gamma: &Gamma, delta: &Delta) -> Result<(), Error> {
    debug!("Checking function `{}`", function.name);

    let declarations = function
        .params
        .iter()
        .chain(function.locals.iter())
        .collect::<Vec<&Declaration>>();

    let mut names = HashSet::new();
    for declaration in declarations.iter() {
        if !declaration.ty.is_storable() {
            return Err(MK_ERROR!(InvalidVariableType {
                ty: declaration.ty.to_string(),
                variable: declaration.name.clone(),
                function: function.name.clone()
            }));
        }
        if !names.insert(declaration.name.as_str()) {
            return Err(MK_ERROR!(VariableAlreadyDeclared {
                variable: declaration.name.clone(),
                function: function.name.clone()
            }));
        }
    }

    match &function.body {
        Statement::Statements(statements) if !statements.is_empty() => {}
        _ => {
            return Err(MK_ERROR!(EmptyFunctionBody {
                function: function.name.clone()
            }))
        }
    }

    let type_checker = TypeChecker::new(extend_gamma(gamma, &declarations), delta);
    if !type_check_stmt(&type_checker, &function.body, &function.return_type, false)? {
        return Err(MK_ERROR!(MayNotReturn {
            function: function.name.clone()
        }));
    }

    Ok(())
}

/// The program-wide rules: unique top-level names and a well-formed `main`.
pub fn type_check_names(program: &Program) -> Result<(), Error> {
    let mut names = HashSet::new();
    let top_level_names = program
        .structs
        .iter()
        .map(|definition| &definition.name)
        .chain(program.externs.iter().map(|external| &external.name))
        .chain(program.functions.iter().map(|function| &function.name));

    for name in top_level_names {
        if !names.insert(name.as_str()) {
            return Err(MK_ERROR!(NameAlreadyDeclared { name: name.clone() }).locate(Location::Program));
        }
    }

    match program.functions.iter().find(|function| function.name == MAIN) {
        Some(main) if main.params.is_empty() && main.return_type.is_int() => Ok(()),
        Some(_) => Err(MK_ERROR!(MainWrongType).locate(Location::Program)),
        None => Err(MK_ERROR!(MissingMain).locate(Location::Program)),
    }
}

/// Checks every struct and every function, stopping at the first error.
pub fn type_check(program: &Program) -> Result<(), Error> {
    type_check_names(program)?;

    let gamma = construct_gamma(&program.externs, &program.functions);
    let delta = construct_delta(&program.structs);

    for definition in program.structs.iter() {
        type_check_struct(definition).map_err(|error| error.locate(Location::Struct(definition.name.clone())))?;
    }

    for function in program.functions.iter() {
        type_check_function(function, &gamma, &delta)
            .map_err(|error| error.locate(Location::Function(function.name.clone())))?;
    }

    Ok(())
}

/// Like [`type_check`], but keeps going after a failing struct or function
/// and returns the first error of each, in declaration order. Program-wide
/// failures still stop the check immediately.
pub fn type_check_all(program: &Program) -> Result<(), Vec<Error>> {
    type_check_names(program).map_err(|error| vec![error])?;

    let gamma = construct_gamma(&program.externs, &program.functions);
    let delta = construct_delta(&program.structs);

    let struct_errors = program.structs.iter().filter_map(|definition| {
        type_check_struct(definition)
            .err()
            .map(|error| error.locate(Location::Struct(definition.name.clone())))
    });
    let function_errors = program.functions.iter().filter_map(|function| {
        type_check_function(function, &gamma, &delta)
            .err()
            .map(|error| error.locate(Location::Function(function.name.clone())))
    });

    let errors = struct_errors.chain(function_errors).collect::<Vec<Error>>();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
