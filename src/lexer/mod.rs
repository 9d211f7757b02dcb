//! Lexical analysis for OGNL expressions.
//!
//! The lexer turns source text into a lazy stream of tokens. It handles:
//!
//! - Keyword operators and their symbolic aliases (`and` / `&&`, `eq` / `==`)
//! - The fused `not in` comparison
//! - Numeric literals in decimal, hex and octal with width suffixes
//! - String, char and back-quoted char literals with escapes
//! - Dynamic subscripts (`[^]`, `[|]`, `[$]`, `[*]`) and `#this` / `#root` / `#var`

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
