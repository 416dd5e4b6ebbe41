//! Type checking and semantic analysis module.
//!
//! This module decides whether a decoded program is well-typed:
//!
//! - Building the scope tables (Gamma for names, Delta for struct fields)
//! - Computing and validating the type of every expression and place
//! - Checking calls against function and function-pointer signatures
//! - Proving that every function body definitely returns
//! - Enforcing the program-wide rules (unique names, a `main` of type `() -> int`)
//!
//! Checking is fail-fast inside a struct or function. Functions are checked
//! independently against their own copy of Gamma.

pub mod environment;
pub mod program;
pub mod type_checker;
