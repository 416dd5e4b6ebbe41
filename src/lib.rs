#![allow(clippy::module_inception)]

use std::{fmt::Display, fs, path::Path, time::Instant};

use log::info;

use crate::{
    errors::errors::{Error, ErrorImpl},
    parser::parser::parse,
    type_checker::program::{type_check, type_check_all},
};

pub mod ast;
pub mod errors;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// Where in the program a failure was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Not attributed yet; the enclosing item fills this in.
    Unknown,
    /// The input file or its decoding.
    Input,
    /// A program-wide rule (names, `main`).
    Program,
    Struct(String),
    Function(String),
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Unknown => write!(f, "<unknown>"),
            Location::Input => write!(f, "input"),
            Location::Program => write!(f, "program"),
            Location::Struct(name) => write!(f, "struct {}", name),
            Location::Function(name) => write!(f, "function {}", name),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Check every struct and function even after one has failed, keeping
    /// the first error of each.
    pub report_all: bool,
}

/// The outcome of checking a program that decoded successfully.
#[derive(Debug, Clone)]
pub enum Verdict {
    Valid,
    /// Never empty.
    Invalid(Vec<Error>),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn errors(&self) -> &[Error] {
        match self {
            Verdict::Valid => &[],
            Verdict::Invalid(errors) => errors,
        }
    }
}

/// One line per error: `valid`, or `invalid: <message>`.
impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Valid => write!(f, "valid"),
            Verdict::Invalid(errors) => {
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "invalid: {}", error)?;
                }
                Ok(())
            }
        }
    }
}

/// Decodes and checks one program.
///
/// `Err` means the input could not be decoded; a decoded program always
/// yields a `Verdict`.
pub fn check_source(source: &str, options: &CheckOptions) -> Result<Verdict, Error> {
    let parse_start = Instant::now();
    let program = parse(source)?;
    info!("Decoded in {:?}", parse_start.elapsed());

    let type_check_start = Instant::now();
    let verdict = if options.report_all {
        match type_check_all(&program) {
            Ok(()) => Verdict::Valid,
            Err(errors) => Verdict::Invalid(errors),
        }
    } else {
        match type_check(&program) {
            Ok(()) => Verdict::Valid,
            Err(error) => Verdict::Invalid(vec![error]),
        }
    };
    info!("Type checked in {:?}", type_check_start.elapsed());

    Ok(verdict)
}

pub fn check_file(path: &Path, options: &CheckOptions) -> Result<Verdict, Error> {
    let source = fs::read_to_string(path).map_err(|error| {
        Error::new(
            ErrorImpl::Io {
                path: path.display().to_string(),
                message: error.to_string(),
            },
            Location::Input,
        )
    })?;

    check_source(&source, options)
}
