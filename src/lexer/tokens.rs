use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{Position, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("bor", TokenKind::BitOr);
        map.insert("xor", TokenKind::Xor);
        map.insert("band", TokenKind::BitAnd);
        map.insert("eq", TokenKind::Equals);
        map.insert("neq", TokenKind::NotEquals);
        map.insert("lt", TokenKind::Less);
        map.insert("gt", TokenKind::Greater);
        map.insert("lte", TokenKind::LessEquals);
        map.insert("gte", TokenKind::GreaterEquals);
        map.insert("in", TokenKind::In);
        map.insert("not", TokenKind::Not);
        map.insert("shl", TokenKind::ShiftLeft);
        map.insert("shr", TokenKind::ShiftRight);
        map.insert("ushr", TokenKind::UnsignedShiftRight);
        map.insert("instanceof", TokenKind::Instanceof);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("null", TokenKind::Null);
        map.insert("new", TokenKind::New);
        map
    };
}

/// Token categories. The declaration order is the stable ordinal used in
/// diagnostics, so new members go at the end.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Illegal,
    EOF,
    Whitespace,

    Identifier,
    IntLiteral,
    FloatLiteral,
    CharLiteral,
    StringLiteral,
    BackCharLiteral,

    Assign,    // =
    Comma,     // ,
    Semicolon, // ;
    Question,  // ?
    Colon,     // :
    Dot,       // .

    Or,  // || or
    And, // && and
    Not, // ! not

    BitOr,  // | bor
    Xor,    // ^ xor
    BitAnd, // & band
    BitNot, // ~

    Equals,        // == eq
    NotEquals,     // != neq
    Less,          // < lt
    Greater,       // > gt
    LessEquals,    // <= lte
    GreaterEquals, // >= gte
    In,
    NotIn,
    Instanceof,

    ShiftLeft,          // << shl
    ShiftRight,         // >> shr
    UnsignedShiftRight, // >>> ushr

    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,

    True,
    False,
    Null,
    New,

    This,
    Root,
    Hash,
    At,
    Dollar,
    DynamicSubscript,
}

impl TokenKind {
    /// Diagnostic name of the category.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::EOF => "EOF",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Identifier => "IDENT",
            TokenKind::IntLiteral => "INT_LITERAL",
            TokenKind::FloatLiteral => "FLT_LITERAL",
            TokenKind::CharLiteral => "CHAR_LITERAL",
            TokenKind::StringLiteral => "STR_LITERAL",
            TokenKind::BackCharLiteral => "BACK_CHAR_LITERAL",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Question => "QUESTION",
            TokenKind::Colon => "COLON",
            TokenKind::Dot => "DOT",
            TokenKind::Or => "OR",
            TokenKind::And => "AND",
            TokenKind::Not => "NOT",
            TokenKind::BitOr => "BIT_OR",
            TokenKind::Xor => "XOR",
            TokenKind::BitAnd => "BIT_AND",
            TokenKind::BitNot => "BIT_NOT",
            TokenKind::Equals => "EQ",
            TokenKind::NotEquals => "NOT_EQ",
            TokenKind::Less => "LT",
            TokenKind::Greater => "GT",
            TokenKind::LessEquals => "LT_EQ",
            TokenKind::GreaterEquals => "GT_EQ",
            TokenKind::In => "IN",
            TokenKind::NotIn => "NOT_IN",
            TokenKind::Instanceof => "INSTANCEOF",
            TokenKind::ShiftLeft => "SHL",
            TokenKind::ShiftRight => "SHR",
            TokenKind::UnsignedShiftRight => "USHR",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Modulo => "MODULO",
            TokenKind::OpenParen => "LPAREN",
            TokenKind::CloseParen => "RPAREN",
            TokenKind::OpenCurly => "LBRACE",
            TokenKind::CloseCurly => "RBRACE",
            TokenKind::OpenBracket => "LBRACK",
            TokenKind::CloseBracket => "RBRACK",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
            TokenKind::New => "NEW",
            TokenKind::This => "THIS",
            TokenKind::Root => "ROOT",
            TokenKind::Hash => "HASH",
            TokenKind::At => "AT",
            TokenKind::Dollar => "DOLLAR",
            TokenKind::DynamicSubscript => "DYNAMIC_SUBSCRIPT",
        }
    }

    /// Canonical symbol used when rendering an operator.
    pub fn operator_symbol(&self) -> &'static str {
        match self {
            TokenKind::Assign => "=",
            TokenKind::Comma => ",",
            TokenKind::Or => "||",
            TokenKind::And => "&&",
            TokenKind::Not => "!",
            TokenKind::BitOr => "|",
            TokenKind::Xor => "^",
            TokenKind::BitAnd => "&",
            TokenKind::BitNot => "~",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::LessEquals => "<=",
            TokenKind::GreaterEquals => ">=",
            TokenKind::In => "in",
            TokenKind::NotIn => "not in",
            TokenKind::Instanceof => "instanceof",
            TokenKind::ShiftLeft => "<<",
            TokenKind::ShiftRight => ">>",
            TokenKind::UnsignedShiftRight => ">>>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Multiply => "*",
            TokenKind::Divide => "/",
            TokenKind::Modulo => "%",
            _ => self.name(),
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Positional selector written as `[^]`, `[|]`, `[$]` or `[*]`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum DynamicSubscript {
    First,
    Mid,
    Last,
    All,
}

impl DynamicSubscript {
    pub fn from_symbol(symbol: char) -> Option<DynamicSubscript> {
        match symbol {
            '^' => Some(DynamicSubscript::First),
            '|' => Some(DynamicSubscript::Mid),
            '$' => Some(DynamicSubscript::Last),
            '*' => Some(DynamicSubscript::All),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            DynamicSubscript::First => '^',
            DynamicSubscript::Mid => '|',
            DynamicSubscript::Last => '$',
            DynamicSubscript::All => '*',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DynamicSubscript::First => "FIRST",
            DynamicSubscript::Mid => "MID",
            DynamicSubscript::Last => "LAST",
            DynamicSubscript::All => "ALL",
        }
    }
}

impl Display for DynamicSubscript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.symbol())
    }
}

/// A numeric literal together with the width its suffix selected.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum NumberLiteral {
    Int(i64),
    Long(i64),
    BigInteger(i64),
    Double(f64),
    Float(f64),
    BigDecimal(f64),
}

impl NumberLiteral {
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            NumberLiteral::Int(_) | NumberLiteral::Long(_) | NumberLiteral::BigInteger(_)
        )
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumberLiteral::Int(v) | NumberLiteral::Long(v) | NumberLiteral::BigInteger(v) => {
                Some(*v)
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            NumberLiteral::Int(v) | NumberLiteral::Long(v) | NumberLiteral::BigInteger(v) => {
                *v as f64
            }
            NumberLiteral::Double(v) | NumberLiteral::Float(v) | NumberLiteral::BigDecimal(v) => {
                *v
            }
        }
    }
}

impl Display for NumberLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberLiteral::Int(v) => write!(f, "{}", v),
            NumberLiteral::Long(v) => write!(f, "{}L", v),
            NumberLiteral::BigInteger(v) => write!(f, "{}H", v),
            NumberLiteral::Double(v) => write!(f, "{}", format_float(*v)),
            NumberLiteral::Float(v) => write!(f, "{}f", format_float(*v)),
            NumberLiteral::BigDecimal(v) => write!(f, "{}B", format_float(*v)),
        }
    }
}

fn format_float(value: f64) -> String {
    let text = value.to_string();
    if text.contains(['.', 'e', 'E', 'i', 'N']) {
        text
    } else {
        text + ".0"
    }
}

/// Semantic value attached to literal tokens.
#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Number(NumberLiteral),
    Char(char),
    String(String),
    Subscript(DynamicSubscript),
}

impl Literal {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Literal::Number(number) => number.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Number(number) => Some(number.as_f64()),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Literal::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_subscript(&self) -> Option<DynamicSubscript> {
        match self {
            Literal::Subscript(subscript) => Some(*subscript),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub literal: Option<Literal>,
    pub line: usize,
    pub column: usize,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token{{Type: {}, Value: {}, Line: {}, Column: {}}}",
            self.kind, self.value, self.line, self.column
        )
    }
}

impl Token {
    /// 0-based byte offset of the first lexeme character.
    pub fn position(&self) -> u32 {
        self.span.start.0
    }

    pub fn start(&self) -> Position {
        self.span.start.clone()
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Variable name of a `#name` token.
    pub fn hash_name(&self) -> &str {
        self.value.strip_prefix('#').unwrap_or(&self.value)
    }

    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::StringLiteral,
            TokenKind::Identifier,
            TokenKind::IntLiteral,
            TokenKind::FloatLiteral,
            TokenKind::Hash,
        ]) {
            format!("{} ({})", self.kind, self.value)
        } else {
            format!("{} ()", self.kind)
        }
    }
}
