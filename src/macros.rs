//! Utility macros for the lexer and the AST.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler for fixed operator lexemes
//! - `MK_EXPR_BASE!` - Implements the boilerplate `Expr` methods of an AST node

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Plus, "+".to_string(), None, 1, 1, span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $literal:expr, $line:expr, $column:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            literal: $literal,
            line: $line,
            column: $column,
            span: $span,
        }
    };
}

/// Creates a lexer handler for a fixed lexeme.
///
/// The handler emits a token of the given kind covering exactly the length
/// of `$value` and advances the lexer past it.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new(r"^>>>").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::UnsignedShiftRight, ">>>"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut $crate::lexer::lexer::Lexer, _regex: &regex::Regex| {
            Some(lexer.emit($kind, $value.len(), None))
        }
    };
}

/// Implements the `Expr` methods every node shares.
///
/// The node must be `Clone` and carry a `span: Span` field.
///
/// # Example
///
/// ```ignore
/// impl Expr for NullExpr {
///     MK_EXPR_BASE!();
///     fn get_expr_type(&self) -> ExprType { ExprType::Null }
///     ...
/// }
/// ```
#[macro_export]
macro_rules! MK_EXPR_BASE {
    () => {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn clone_wrapper(&self) -> $crate::ast::ast::ExprWrapper {
            $crate::ast::ast::ExprWrapper::new(self.clone())
        }
        fn get_span(&self) -> &$crate::Span {
            &self.span
        }
    };
}
