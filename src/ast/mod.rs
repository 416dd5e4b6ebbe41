/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Top-level items (structs, externs, functions, the program)
/// - expressions: Expressions, places and function calls
/// - statements: Statements
/// - types: The type model and its equality relation
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
