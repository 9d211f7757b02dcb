/// AST (Abstract Syntax Tree) module
/// Contains the nodes the parser builds for an OGNL expression
///
/// Submodules:
/// - ast: Core AST definitions and traits
/// - expressions: Definitions for the expression node set
/// - statements: The statement family wrapping a whole expression
pub mod ast;
pub mod expressions;
pub mod statements;
