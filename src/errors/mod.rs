//! Error types and error handling for the OGNL front-end.
//!
//! Lexical and syntactic errors are values carrying the source position
//! they were raised at. Neither the lexer nor the parser stops at the first
//! one; both accumulate them and hand the list back to the caller.

pub mod errors;
