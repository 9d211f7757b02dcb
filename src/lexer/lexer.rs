use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{DynamicSubscript, Literal, NumberLiteral, Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    /// Tried in order against the unread input; the first match wins, so
    /// longer operators are listed before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^[ \t\r\n]+").unwrap(), handler: whitespace_handler },
        RegexPattern { regex: Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^#[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: hash_handler },
        RegexPattern { regex: Regex::new(r"^(0[xX]|[0-9]|\.[0-9])").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^'").unwrap(), handler: char_handler },
        RegexPattern { regex: Regex::new("^`").unwrap(), handler: back_char_handler },
        RegexPattern { regex: Regex::new(r"^\[[\^|$*]\]").unwrap(), handler: dynamic_subscript_handler },
        RegexPattern { regex: Regex::new(r"^>>>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::UnsignedShiftRight, ">>>") },
        RegexPattern { regex: Regex::new(r"^>>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>") },
        RegexPattern { regex: Regex::new(r"^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new(r"^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new(r"^<<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<") },
        RegexPattern { regex: Regex::new(r"^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new(r"^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new(r"^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new(r"^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assign, "=") },
        RegexPattern { regex: Regex::new(r"^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new(r"^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new(r"^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new(r"^&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitAnd, "&") },
        RegexPattern { regex: Regex::new(r"^\|\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new(r"^\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitOr, "|") },
        RegexPattern { regex: Regex::new(r"^\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Xor, "^") },
        RegexPattern { regex: Regex::new(r"^~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BitNot, "~") },
        RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new(r"^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Minus, "-") },
        RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Multiply, "*") },
        RegexPattern { regex: Regex::new(r"^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Divide, "/") },
        RegexPattern { regex: Regex::new(r"^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Modulo, "%") },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(r"^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new(r"^\?").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Question, "?") },
        RegexPattern { regex: Regex::new(r"^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new(r"^\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new(r"^#").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Hash, "#") },
        RegexPattern { regex: Regex::new(r"^@").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::At, "@") },
        RegexPattern { regex: Regex::new(r"^\$").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dollar, "$") },
    ];
}

#[derive(Debug, Clone, Default)]
pub struct LexerOptions {
    /// Name reported in positions, `shell` when absent.
    pub file: Option<String>,
    /// Emit `Whitespace` tokens instead of skipping them.
    pub emit_whitespace: bool,
}

/// Streaming scanner over an in-memory source.
///
/// Each call to [`Lexer::next_token`] produces one token; once the input is
/// exhausted every further call yields `EOF`. Lexical errors never stop the
/// scan, they are collected and exposed through [`Lexer::errors`].
#[derive(Debug, Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    line: usize,
    column: usize,
    file: Rc<String>,
    emit_whitespace: bool,
    errors: Vec<Error>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        Lexer::with_options(
            source,
            LexerOptions {
                file,
                ..LexerOptions::default()
            },
        )
    }

    pub fn with_options(source: String, options: LexerOptions) -> Lexer {
        let file_name = if let Some(file) = options.file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 1,
            file: file_name,
            emit_whitespace: options.emit_whitespace,
            errors: vec![],
            finished: false,
        }
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            if self.at_eof() {
                self.finished = true;
                return self.eof_token();
            }

            let pattern = PATTERNS
                .iter()
                .find(|pattern| pattern.regex.is_match(self.remainder()));

            let token = match pattern {
                Some(pattern) => (pattern.handler)(self, &pattern.regex),
                None => Some(self.unrecognised_char()),
            };

            if let Some(token) = token {
                trace!(token = %token.debug(), line = token.line, column = token.column, "lexed");
                return token;
            }
        }
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn current_position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Emits a token whose value is the next `len` bytes of input.
    pub fn emit(&mut self, kind: TokenKind, len: usize, literal: Option<Literal>) -> Token {
        let end = (self.pos + len).min(self.source.len());
        let value = self.source[self.pos..end].to_string();
        self.emit_with_value(kind, len, value, literal)
    }

    pub fn emit_with_value(
        &mut self,
        kind: TokenKind,
        len: usize,
        value: String,
        literal: Option<Literal>,
    ) -> Token {
        let start = self.pos;
        let (line, column) = (self.line, self.column);
        self.advance_n(len);

        MK_TOKEN!(
            kind,
            value,
            literal,
            line,
            column,
            Span {
                start: Position(start as u32, Rc::clone(&self.file)),
                end: Position(self.pos as u32, Rc::clone(&self.file)),
            }
        )
    }

    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for c in self.source[self.pos..end].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    /// Emits an `Illegal` token over the next `len` bytes and records `error` at its start.
    fn illegal(&mut self, len: usize, error: ErrorImpl) -> Token {
        let error = Error::new(error, self.current_position());
        debug!(%error, line = self.line, column = self.column, "lexical error");
        self.errors.push(error);
        self.emit(TokenKind::Illegal, len, None)
    }

    fn unrecognised_char(&mut self) -> Token {
        let c = self.remainder().chars().next().unwrap_or('\0');
        self.illegal(
            c.len_utf8(),
            ErrorImpl::UnrecognisedToken {
                token: c.to_string(),
            },
        )
    }

    fn eof_token(&self) -> Token {
        MK_TOKEN!(
            TokenKind::EOF,
            String::new(),
            None,
            self.line,
            self.column,
            Span {
                start: self.current_position(),
                end: self.current_position(),
            }
        )
    }

    fn match_len(&self, regex: &Regex) -> usize {
        regex.find(self.remainder()).map_or(0, |m| m.end())
    }

    /// Length of a `not in` sequence starting at the current position, given
    /// the length of the already matched `not`.
    fn not_in_length(&self, not_len: usize) -> Option<usize> {
        let rest = &self.remainder()[not_len..];
        let trimmed = rest.trim_start_matches([' ', '\t', '\r', '\n']);
        let gap = rest.len() - trimmed.len();

        let after = trimmed.strip_prefix("in")?;
        if after.starts_with(is_identifier_char) {
            return None;
        }

        Some(not_len + gap + 2)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token up to and including the first `EOF`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        Some(self.next_token())
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn whitespace_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let len = lexer.match_len(regex);

    if lexer.emit_whitespace {
        return Some(lexer.emit(TokenKind::Whitespace, len, None));
    }

    lexer.advance_n(len);
    None
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let len = lexer.match_len(regex);
    let reserved = RESERVED_LOOKUP.get(&lexer.remainder()[..len]).copied();

    match reserved {
        Some(TokenKind::Not) => match lexer.not_in_length(len) {
            Some(fused) => Some(lexer.emit_with_value(
                TokenKind::NotIn,
                fused,
                String::from("not in"),
                None,
            )),
            None => Some(lexer.emit(TokenKind::Not, len, None)),
        },
        Some(kind) => Some(lexer.emit(kind, len, None)),
        None => Some(lexer.emit(TokenKind::Identifier, len, None)),
    }
}

fn hash_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let len = lexer.match_len(regex);
    let kind = match &lexer.remainder()[1..len] {
        "this" => TokenKind::This,
        "root" => TokenKind::Root,
        _ => TokenKind::Hash,
    };

    Some(lexer.emit(kind, len, None))
}

fn dynamic_subscript_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let len = lexer.match_len(regex);
    let symbol = lexer.remainder()[1..].chars().next();

    match symbol.and_then(DynamicSubscript::from_symbol) {
        Some(subscript) => Some(lexer.emit(
            TokenKind::DynamicSubscript,
            len,
            Some(Literal::Subscript(subscript)),
        )),
        None => Some(lexer.emit(TokenKind::OpenBracket, 1, None)),
    }
}

fn number_handler(lexer: &mut Lexer, _regex: &Regex) -> Option<Token> {
    let text = lexer.remainder();

    let scanned = if text.starts_with("0x") || text.starts_with("0X") {
        scan_hex(text)
    } else {
        scan_decimal(text)
    };

    match scanned {
        Ok((len, kind, number)) => Some(lexer.emit(kind, len, Some(Literal::Number(number)))),
        Err(len) => {
            let token = lexer.remainder()[..len].to_string();
            Some(lexer.illegal(len, ErrorImpl::NumberParseError { token }))
        }
    }
}

/// Scans a numeric literal starting with `0x`.
///
/// Returns the lexeme length, the token category and the value, or the
/// length of the unparsable lexeme.
fn scan_hex(text: &str) -> Result<(usize, TokenKind, NumberLiteral), usize> {
    let bytes = text.as_bytes();
    let mut i = 2;
    while i < bytes.len() && bytes[i].is_ascii_hexdigit() {
        i += 1;
    }
    let digits = &text[2..i];

    let suffix = integer_suffix(text, i);
    let len = i + usize::from(suffix.is_some());

    let value = i64::from_str_radix(digits, 16).map_err(|_| len)?;
    Ok((len, TokenKind::IntLiteral, int_width(value, suffix)))
}

fn scan_decimal(text: &str) -> Result<(usize, TokenKind, NumberLiteral), usize> {
    let bytes = text.as_bytes();
    let at = |i: usize| bytes.get(i).copied();
    let is_digit = |i: usize| at(i).is_some_and(|b| b.is_ascii_digit());
    let is_ident = |i: usize| at(i).is_some_and(|b| is_identifier_char(b as char));

    let mut i = 0;
    while is_digit(i) {
        i += 1;
    }
    let mut is_float = false;

    if at(i) == Some(b'.') {
        if is_digit(i + 1) {
            i += 1;
            while is_digit(i) {
                i += 1;
            }
            is_float = true;
        } else if at(i + 1).is_some_and(is_float_suffix) && !is_ident(i + 2) {
            // `5.f`
            i += 1;
            is_float = true;
        } else if !is_ident(i + 1) && at(i + 1) != Some(b'.') {
            // `5.` but not `5.toString()` or `5..`
            i += 1;
            is_float = true;
        }
    }

    if matches!(at(i), Some(b'e') | Some(b'E')) {
        i += 1;
        if matches!(at(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        if !is_digit(i) {
            return Err(i);
        }
        while is_digit(i) {
            i += 1;
        }
        is_float = true;
    }

    let digits = &text[..i];
    let kind = if is_float {
        TokenKind::FloatLiteral
    } else {
        TokenKind::IntLiteral
    };

    if let Some(suffix) = at(i).filter(|b| is_float_suffix(*b) && !is_ident(i + 1)) {
        let len = i + 1;
        let value = digits.parse::<f64>().map_err(|_| len)?;
        return Ok((len, kind, float_width(value, Some(suffix))));
    }

    if is_float {
        let value = digits.parse::<f64>().map_err(|_| i)?;
        return Ok((i, kind, float_width(value, None)));
    }

    let suffix = integer_suffix(text, i);
    let len = i + usize::from(suffix.is_some());

    let value = if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8).map_err(|_| len)?
    } else {
        digits.parse::<i64>().map_err(|_| len)?
    };

    Ok((len, kind, int_width(value, suffix)))
}

fn is_float_suffix(b: u8) -> bool {
    matches!(b, b'f' | b'F' | b'd' | b'D' | b'b' | b'B')
}

fn integer_suffix(text: &str, i: usize) -> Option<u8> {
    let bytes = text.as_bytes();
    let suffix = bytes
        .get(i)
        .copied()
        .filter(|b| matches!(b, b'l' | b'L' | b'h' | b'H'))?;

    match bytes.get(i + 1) {
        Some(b) if is_identifier_char(*b as char) => None,
        _ => Some(suffix),
    }
}

fn int_width(value: i64, suffix: Option<u8>) -> NumberLiteral {
    match suffix {
        Some(b'l') | Some(b'L') => NumberLiteral::Long(value),
        Some(b'h') | Some(b'H') => NumberLiteral::BigInteger(value),
        _ => NumberLiteral::Int(value),
    }
}

fn float_width(value: f64, suffix: Option<u8>) -> NumberLiteral {
    match suffix {
        Some(b'f') | Some(b'F') => NumberLiteral::Float(value),
        Some(b'b') | Some(b'B') => NumberLiteral::BigDecimal(value),
        _ => NumberLiteral::Double(value),
    }
}

enum Quoted {
    Closed { len: usize, text: String },
    BadEscape { len: usize, escape: String },
    Unterminated { len: usize },
}

/// Scans a literal delimited by `quote`, decoding escapes on the way.
fn scan_quoted(text: &str, quote: char) -> Quoted {
    let mut chars = text.char_indices().skip(1).peekable();
    let mut decoded = String::new();
    let mut bad_escape: Option<String> = None;

    while let Some((i, c)) = chars.next() {
        if c == quote {
            let len = i + c.len_utf8();
            return match bad_escape {
                Some(escape) => Quoted::BadEscape { len, escape },
                None => Quoted::Closed { len, text: decoded },
            };
        }

        if c != '\\' {
            decoded.push(c);
            continue;
        }

        let Some((_, escape)) = chars.next() else {
            break;
        };

        let simple = match escape {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'b' => Some('\u{0008}'),
            'f' => Some('\u{000C}'),
            '\\' => Some('\\'),
            '"' => Some('"'),
            '\'' => Some('\''),
            '`' => Some('`'),
            _ => None,
        };
        if let Some(simple) = simple {
            decoded.push(simple);
            continue;
        }

        let code = match escape {
            '0'..='7' => {
                // Up to three digits, staying within \377.
                let max_digits = if escape <= '3' { 3 } else { 2 };
                let mut value = escape.to_digit(8).unwrap_or(0);
                for _ in 1..max_digits {
                    match chars.peek().and_then(|(_, d)| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                Some(value)
            }
            'u' => read_hex(&mut chars, 4),
            'x' => read_hex(&mut chars, 2),
            _ => None,
        };

        match code.and_then(char::from_u32) {
            Some(c) => decoded.push(c),
            None => {
                if bad_escape.is_none() {
                    bad_escape = Some(escape.to_string());
                }
            }
        }
    }

    Quoted::Unterminated { len: text.len() }
}

fn read_hex<I>(chars: &mut std::iter::Peekable<I>, digits: usize) -> Option<u32>
where
    I: Iterator<Item = (usize, char)>,
{
    let mut value = 0;
    for _ in 0..digits {
        let digit = chars.peek().and_then(|(_, d)| d.to_digit(16))?;
        value = value * 16 + digit;
        chars.next();
    }
    Some(value)
}

fn quoted_handler(lexer: &mut Lexer, quote: char) -> Result<(usize, String), Token> {
    match scan_quoted(lexer.remainder(), quote) {
        Quoted::Closed { len, text } => Ok((len, text)),
        Quoted::BadEscape { len, escape } => {
            let token = lexer.remainder()[..len].to_string();
            Err(lexer.illegal(len, ErrorImpl::InvalidEscape { escape, token }))
        }
        Quoted::Unterminated { len } => {
            let token = lexer.remainder()[..len].to_string();
            Err(lexer.illegal(len, ErrorImpl::UnterminatedLiteral { token }))
        }
    }
}

fn string_handler(lexer: &mut Lexer, _regex: &Regex) -> Option<Token> {
    match quoted_handler(lexer, '"') {
        Ok((len, text)) => Some(lexer.emit(
            TokenKind::StringLiteral,
            len,
            Some(Literal::String(text)),
        )),
        Err(illegal) => Some(illegal),
    }
}

/// Single quotes hold a char when they enclose exactly one character and a
/// string otherwise.
fn char_handler(lexer: &mut Lexer, _regex: &Regex) -> Option<Token> {
    match quoted_handler(lexer, '\'') {
        Ok((len, text)) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    Some(lexer.emit(TokenKind::CharLiteral, len, Some(Literal::Char(c))))
                }
                _ => Some(lexer.emit(
                    TokenKind::StringLiteral,
                    len,
                    Some(Literal::String(text)),
                )),
            }
        }
        Err(illegal) => Some(illegal),
    }
}

fn back_char_handler(lexer: &mut Lexer, _regex: &Regex) -> Option<Token> {
    match quoted_handler(lexer, '`') {
        Ok((len, text)) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(lexer.emit(
                    TokenKind::BackCharLiteral,
                    len,
                    Some(Literal::Char(c)),
                )),
                _ => {
                    let token = lexer.remainder()[..len].to_string();
                    Some(lexer.illegal(len, ErrorImpl::InvalidCharLiteral { token }))
                }
            }
        }
        Err(illegal) => Some(illegal),
    }
}

/// Scans `source` to completion, failing on the first lexical error.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let tokens: Vec<Token> = lex.by_ref().collect();

    match lex.take_errors().into_iter().next() {
        Some(error) => Err(error),
        None => Ok(tokens),
    }
}
