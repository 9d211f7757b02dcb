use std::collections::HashMap;

use crate::{ast::ast::ExprWrapper, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser};

/// Pratt binding powers, loosest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Sequence,
    Assignment,
    Conditional,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Instanceof,
    Member,
    Primary,
}

pub type NUDHandler = fn(&mut Parser) -> Option<ExprWrapper>;
pub type LEDHandler = fn(&mut Parser, ExprWrapper, BindingPower) -> Option<ExprWrapper>;

pub fn create_token_lookups(parser: &mut Parser) {
    parser.led(TokenKind::Comma, BindingPower::Sequence, parse_sequence_expr);
    parser.led(TokenKind::Assign, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::Question, BindingPower::Conditional, parse_conditional_expr);

    // Logical
    parser.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Bitwise
    parser.led(TokenKind::BitOr, BindingPower::BitwiseOr, parse_binary_expr);
    parser.led(TokenKind::Xor, BindingPower::BitwiseXor, parse_binary_expr);
    parser.led(TokenKind::BitAnd, BindingPower::BitwiseAnd, parse_binary_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::In, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::NotIn, BindingPower::Relational, parse_binary_expr);

    // Shifts
    parser.led(TokenKind::ShiftLeft, BindingPower::Shift, parse_binary_expr);
    parser.led(TokenKind::ShiftRight, BindingPower::Shift, parse_binary_expr);
    parser.led(TokenKind::UnsignedShiftRight, BindingPower::Shift, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Minus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Multiply, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Divide, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Modulo, BindingPower::Multiplicative, parse_binary_expr);

    parser.led(TokenKind::Instanceof, BindingPower::Instanceof, parse_instanceof_expr);

    // Navigation
    parser.led(TokenKind::Dot, BindingPower::Member, parse_chain_expr);
    parser.led(TokenKind::OpenBracket, BindingPower::Member, parse_chain_expr);
    parser.led(TokenKind::DynamicSubscript, BindingPower::Member, parse_chain_expr);
    parser.led(TokenKind::OpenParen, BindingPower::Member, parse_chain_expr);

    // Prefix operators
    parser.nud(TokenKind::Minus, parse_prefix_expr);
    parser.nud(TokenKind::Plus, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::BitNot, parse_prefix_expr);

    // Literals and symbols
    parser.nud(TokenKind::IntLiteral, parse_primary_expr);
    parser.nud(TokenKind::FloatLiteral, parse_primary_expr);
    parser.nud(TokenKind::StringLiteral, parse_primary_expr);
    parser.nud(TokenKind::CharLiteral, parse_primary_expr);
    parser.nud(TokenKind::BackCharLiteral, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::Null, parse_primary_expr);
    parser.nud(TokenKind::This, parse_primary_expr);
    parser.nud(TokenKind::Root, parse_primary_expr);
    parser.nud(TokenKind::Dollar, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::Hash, parse_hash_expr);
    parser.nud(TokenKind::Illegal, parse_illegal_expr);

    // Brackets
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenBracket, parse_index_expr);
    parser.nud(TokenKind::DynamicSubscript, parse_dynamic_subscript_expr);
    parser.nud(TokenKind::OpenCurly, parse_list_expr);

    parser.nud(TokenKind::New, parse_constructor_expr);
    parser.nud(TokenKind::At, parse_static_expr);
    parser.nud(TokenKind::Colon, parse_lambda_expr);
}

// Lookup tables inside parser struct, so it's easier
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
