//! Parser driver for OGNL expressions.
//!
//! The parser pulls tokens lazily from its lexer and keeps a two token
//! window (`current`, `peek`). Expressions are parsed with a Pratt parser
//! whose NUD/LED handlers and binding powers live in lookup tables built by
//! [`create_token_lookups`].
//!
//! Errors never abort parsing by themselves: they are accumulated and
//! returned alongside whatever part of the tree could be built. Every loop in
//! the grammar consults [`Parser::check_iteration_limit`], so a malformed or
//! oversized input ends with an error instead of spinning forever. Recursion
//! is bounded the same way by [`Parser::enter_nesting`].

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{
    ast::ast::ExprWrapper,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    expr::parse_expr,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup,
    },
};

/// Ceiling on parser steps for a single expression.
pub const MAX_PARSE_ITERATIONS: usize = 20000;

/// Ceiling on nested expression parses, kept well inside a 2MB thread stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Token source, read one token ahead of `peek`
    lexer: Lexer,
    /// The token under examination
    current: Token,
    /// One token of look-ahead
    peek: Token,
    /// Number of tokens shifted so far
    pos: usize,
    /// Lexical and syntactic errors, in the order they were found
    errors: Vec<Error>,
    iteration_count: usize,
    /// Expression parses currently on the stack
    depth: usize,
    /// Set once the iteration or nesting ceiling is hit; no further work is done
    halted: bool,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a parser over `lexer` and reads the first two tokens.
    pub fn new(mut lexer: Lexer) -> Self {
        let mut errors = vec![];
        let current = Self::pull(&mut lexer, &mut errors);
        let peek = Self::pull(&mut lexer, &mut errors);

        let mut parser = Parser {
            lexer,
            current,
            peek,
            pos: 0,
            errors,
            iteration_count: 0,
            depth: 0,
            halted: false,
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };

        create_token_lookups(&mut parser);
        parser
    }

    /// Reads the next significant token, folding lexical errors into `errors`.
    fn pull(lexer: &mut Lexer, errors: &mut Vec<Error>) -> Token {
        loop {
            let token = lexer.next_token();
            errors.extend(lexer.take_errors());

            if token.kind != TokenKind::Whitespace {
                return token;
            }
        }
    }

    /// Shifts `peek` into `current` and reads a new `peek`.
    pub fn next_token(&mut self) {
        self.advance();
    }

    /// Advances to the next token and returns the token that was current.
    pub fn advance(&mut self) -> Token {
        let next = Self::pull(&mut self.lexer, &mut self.errors);
        let previous_peek = std::mem::replace(&mut self.peek, next);
        self.pos += 1;
        std::mem::replace(&mut self.current, previous_peek)
    }

    pub fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advances only if the look-ahead token is of `kind`, otherwise records
    /// an error and stays put.
    pub fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_token_is(kind) {
            self.next_token();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    /// Consumes the current token if it is of `kind`.
    ///
    /// On a mismatch the error names the token that was found and nothing is
    /// consumed.
    pub fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.current_token_is(kind) {
            return Some(self.advance());
        }

        self.push_error(Error::new(
            ErrorImpl::UnexpectedPeek {
                expected: kind,
                received: self.current.kind,
            },
            self.current.start(),
        ));
        None
    }

    pub fn peek_error(&mut self, kind: TokenKind) {
        self.push_error(Error::new(
            ErrorImpl::UnexpectedPeek {
                expected: kind,
                received: self.peek.kind,
            },
            self.peek.start(),
        ));
    }

    /// Records an error about the current token.
    pub fn current_error(&mut self, message: impl Into<String>) {
        self.push_error(Error::new(
            ErrorImpl::UnexpectedToken {
                kind: self.current.kind,
                message: message.into(),
            },
            self.current.start(),
        ));
    }

    /// Records `error` unless the parser has halted.
    pub fn push_error(&mut self, error: Error) {
        if !self.halted {
            self.errors.push(error);
        }
    }

    /// Counts one parser step.
    ///
    /// Returns false once the step count passes [`MAX_PARSE_ITERATIONS`]. The
    /// first failure records an error; after that the parser is halted and
    /// every call fails quietly.
    pub fn check_iteration_limit(&mut self) -> bool {
        if self.halted {
            return false;
        }

        self.iteration_count += 1;
        if self.iteration_count <= MAX_PARSE_ITERATIONS {
            return true;
        }

        warn!(
            limit = MAX_PARSE_ITERATIONS,
            position = self.current.position(),
            "parse iteration limit exceeded"
        );
        self.errors.push(Error::new(
            ErrorImpl::IterationLimitExceeded {
                kind: self.current.kind,
                limit: MAX_PARSE_ITERATIONS,
            },
            self.current.start(),
        ));
        self.halted = true;
        false
    }

    /// Enters one level of expression nesting.
    ///
    /// Returns false once the depth passes [`MAX_NESTING_DEPTH`], recording
    /// one error and halting the parser like [`Parser::check_iteration_limit`].
    /// Every successful call must be paired with [`Parser::exit_nesting`].
    pub fn enter_nesting(&mut self) -> bool {
        if self.halted {
            return false;
        }

        if self.depth < MAX_NESTING_DEPTH {
            self.depth += 1;
            return true;
        }

        warn!(
            limit = MAX_NESTING_DEPTH,
            position = self.current.position(),
            "expression nesting limit exceeded"
        );
        self.errors.push(Error::new(
            ErrorImpl::NestingLimitExceeded {
                kind: self.current.kind,
                limit: MAX_NESTING_DEPTH,
            },
            self.current.start(),
        ));
        self.halted = true;
        false
    }

    pub fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current expression nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn skip_whitespace(&mut self) {
        while self.current_token_is(TokenKind::Whitespace) {
            self.next_token();
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_token(&self) -> &Token {
        &self.current
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Number of tokens consumed so far.
    pub fn token_count(&self) -> usize {
        self.pos
    }

    pub fn iteration_count(&self) -> usize {
        self.iteration_count
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.start()
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Parses one complete expression.
    ///
    /// Tokens left over before `EOF` are reported; the expression parsed up
    /// to that point is still returned.
    pub fn parse_top_level_expression(&mut self) -> Option<ExprWrapper> {
        self.skip_whitespace();

        let expression = parse_expr(self, BindingPower::Default);

        if expression.is_some() && !self.current_token_is(TokenKind::EOF) {
            self.current_error("expected end of expression");
        }

        debug!(
            tokens = self.pos,
            iterations = self.iteration_count,
            errors = self.errors.len(),
            "parsed expression"
        );

        expression
    }
}

/// Lexes and parses `source` in one call.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with the accumulated errors)
/// - The expression, possibly partial, or None when nothing could be built
pub fn parse(source: String, file: Option<String>) -> (Parser, Option<ExprWrapper>) {
    let mut parser = Parser::new(Lexer::new(source, file));
    let expression = parser.parse_top_level_expression();

    (parser, expression)
}
