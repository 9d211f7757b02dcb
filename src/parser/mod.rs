//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that turns the lexer's token stream into
//! an expression tree. It uses a Pratt parser with proper operator
//! precedence and handles:
//!
//! - Operators, from sequences and assignment down to unary prefixes
//! - Navigation chains (properties, calls, indexes, projections, selections)
//! - Literals, collections, constructors and static references
//! - Error accumulation and the iteration guard
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
