use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// True for errors raised while scanning, before any grammar rule ran.
    pub fn is_lexical(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedToken { .. }
                | ErrorImpl::UnterminatedLiteral { .. }
                | ErrorImpl::InvalidEscape { .. }
                | ErrorImpl::InvalidCharLiteral { .. }
                | ErrorImpl::NumberParseError { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedLiteral { .. } => "UnterminatedLiteral",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::InvalidCharLiteral { .. } => "InvalidCharLiteral",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnexpectedPeek { .. } => "UnexpectedPeek",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::IllegalToken { .. } => "IllegalToken",
            ErrorImpl::IterationLimitExceeded { .. } => "IterationLimitExceeded",
            ErrorImpl::NestingLimitExceeded { .. } => "NestingLimitExceeded",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedLiteral { token } => ErrorTip::Suggestion(format!(
                "Literal `{}` is never closed, add the matching quote",
                token
            )),
            ErrorImpl::InvalidEscape { escape, .. } => ErrorTip::Suggestion(format!(
                "Unknown escape `\\{}`, use \\n, \\t, \\uXXXX or an octal escape",
                escape
            )),
            ErrorImpl::InvalidCharLiteral { token } => ErrorTip::Suggestion(format!(
                "Back-quoted literal `{}` must hold exactly one character",
                token
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnexpectedPeek { expected, received } => ErrorTip::Suggestion(format!(
                "Expected `{}` here, found `{}`",
                expected, received
            )),
            ErrorImpl::UnexpectedToken { kind, .. } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", kind))
            }
            ErrorImpl::IllegalToken { token } => {
                ErrorTip::Suggestion(format!("`{}` is not part of the expression grammar", token))
            }
            ErrorImpl::IterationLimitExceeded { .. } => ErrorTip::Suggestion(String::from(
                "The expression is too large or malformed, try splitting it",
            )),
            ErrorImpl::NestingLimitExceeded { .. } => ErrorTip::Suggestion(String::from(
                "Flatten the expression or bind inner parts to variables",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised character: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated literal: {token:?}")]
    UnterminatedLiteral { token: String },
    #[error("invalid escape sequence \\{escape} in {token:?}")]
    InvalidEscape { escape: String, token: String },
    #[error("back-quoted literal must be a single character: {token:?}")]
    InvalidCharLiteral { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("expected next token to be {expected}, got {received} instead")]
    UnexpectedPeek {
        expected: TokenKind,
        received: TokenKind,
    },
    #[error("at token {kind}: {message}")]
    UnexpectedToken { kind: TokenKind, message: String },
    #[error("at token ILLEGAL: illegal token {token:?}")]
    IllegalToken { token: String },
    #[error("at token {kind}: parse iteration limit exceeded ({limit}), possible infinite loop")]
    IterationLimitExceeded { kind: TokenKind, limit: usize },
    #[error("at token {kind}: expression nested deeper than {limit} levels")]
    NestingLimitExceeded { kind: TokenKind, limit: usize },
}
