//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! Programs arrive already parsed, as JSON. This module decodes that JSON
//! into the AST and rejects anything that does not have the shape of a
//! program:
//!
//! - Statement, expression and place nodes are dispatched on their tag
//!   through static lookup tables
//! - Types and declarations go through their serde representations
//! - Every name is checked to be a well-formed identifier
//!
//! All failures here are input errors, distinct from type errors.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
