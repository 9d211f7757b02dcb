use crate::{
    ast::{
        ast::{Expr, ExprWrapper},
        expressions::{
            AssignmentExpr, BinaryExpr, BooleanExpr, CallExpr, ChainExpr, CharExpr,
            ConditionalExpr, ConstructorExpr, ConstructorKind, DollarExpr, DynamicSubscriptExpr,
            EvalExpr, IndexExpr, InstanceofExpr, LambdaExpr, ListExpr, MapExpr, NullExpr,
            NumberExpr, PrefixExpr, ProjectionExpr, PropertyExpr, RootExpr, SelectionExpr,
            SelectionMode, SequenceExpr, StaticFieldExpr, StaticMethodExpr, StringExpr, ThisExpr,
            VariableExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Literal, TokenKind},
    Position, Span,
};

use super::{lookups::BindingPower, parser::Parser};

/// Class used by `@@method()`.
const MATH_CLASS: &str = "java.lang.Math";

type MapEntries = Vec<(ExprWrapper, Option<ExprWrapper>)>;

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Option<ExprWrapper> {
    if !parser.enter_nesting() {
        return None;
    }

    let expression = parse_expr_at_depth(parser, bp);
    parser.exit_nesting();
    expression
}

fn parse_expr_at_depth(parser: &mut Parser, bp: BindingPower) -> Option<ExprWrapper> {
    if !parser.check_iteration_limit() {
        return None;
    }

    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        parser.current_error(format!("no prefix parse function for {} found", token_kind));
        return None;
    };

    let mut left = nud_fn(parser)?;

    // While the current token binds tighter than `bp`, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = parser
            .get_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);

        if token_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };

        if !parser.check_iteration_limit() {
            return None;
        }

        left = led_fn(parser, left, token_bp)?;
    }

    Some(left)
}

fn span_between(start: &Position, end: &Position) -> Span {
    Span {
        start: start.clone(),
        end: end.clone(),
    }
}

// OPERATORS

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    bp: BindingPower,
) -> Option<ExprWrapper> {
    let operator = parser.advance().kind;
    let right = parse_expr(parser, bp)?;

    Some(ExprWrapper::new(BinaryExpr {
        span: span_between(&left.get_span().start, &right.get_span().end),
        left,
        operator,
        right,
    }))
}

/// `a = b = c` groups to the right.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Option<ExprWrapper> {
    parser.advance();
    let value = parse_expr(parser, BindingPower::Sequence)?;

    Some(ExprWrapper::new(AssignmentExpr {
        span: span_between(&left.get_span().start, &value.get_span().end),
        assignee: left,
        value,
    }))
}

pub fn parse_conditional_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Option<ExprWrapper> {
    parser.advance();
    let consequent = parse_expr(parser, BindingPower::Assignment)?;
    parser.expect(TokenKind::Colon)?;
    let alternative = parse_expr(parser, BindingPower::Assignment)?;

    Some(ExprWrapper::new(ConditionalExpr {
        span: span_between(&left.get_span().start, &alternative.get_span().end),
        test: left,
        consequent,
        alternative,
    }))
}

pub fn parse_sequence_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Option<ExprWrapper> {
    let start = left.get_span().start.clone();
    let mut expressions = vec![left];

    while parser.current_token_is(TokenKind::Comma) {
        if !parser.check_iteration_limit() {
            return None;
        }

        parser.next_token();
        expressions.push(parse_expr(parser, BindingPower::Sequence)?);
    }

    let end = expressions.last()?.get_span().end.clone();

    Some(ExprWrapper::new(SequenceExpr {
        expressions,
        span: span_between(&start, &end),
    }))
}

pub fn parse_instanceof_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Option<ExprWrapper> {
    parser.advance();
    let (class_name, end) = parse_class_name(parser)?;

    Some(ExprWrapper::new(InstanceofExpr {
        span: span_between(&left.get_span().start, &end),
        operand: left,
        class_name,
    }))
}

/// Unary `-`, `!`, `not` and `~`. A unary `+` leaves its operand unchanged.
pub fn parse_prefix_expr(parser: &mut Parser) -> Option<ExprWrapper> {
    let operator_token = parser.advance();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    if operator_token.kind == TokenKind::Plus {
        return Some(operand);
    }

    Some(ExprWrapper::new(PrefixExpr {
        span: span_between(&operator_token.span.start, &operand.get_span().end),
        operator: operator_token.kind,
        operand,
    }))
}

// PRIMARY

pub fn parse_primary_expr(parser: &mut Parser) -> Option<ExprWrapper> {
    let token = parser.advance();
    let span = token.span.clone();

    let expr = match (token.kind, token.literal) {
        (TokenKind::IntLiteral | TokenKind::FloatLiteral, Some(Literal::Number(value))) => {
            ExprWrapper::new(NumberExpr { value, span })
        }
        (TokenKind::StringLiteral, Some(Literal::String(value))) => {
            ExprWrapper::new(StringExpr { value, span })
        }
        (TokenKind::CharLiteral, Some(Literal::Char(value))) => ExprWrapper::new(CharExpr {
            value,
            back_quoted: false,
            span,
        }),
        (TokenKind::BackCharLiteral, Some(Literal::Char(value))) => ExprWrapper::new(CharExpr {
            value,
            back_quoted: true,
            span,
        }),
        (TokenKind::True, _) => ExprWrapper::new(BooleanExpr { value: true, span }),
        (TokenKind::False, _) => ExprWrapper::new(BooleanExpr { value: false, span }),
        (TokenKind::Null, _) => ExprWrapper::new(NullExpr { span }),
        (TokenKind::This, _) => ExprWrapper::new(ThisExpr { span }),
        (TokenKind::Root, _) => ExprWrapper::new(RootExpr { span }),
        (TokenKind::Dollar, _) => ExprWrapper::new(DollarExpr { span }),
        (kind, _) => {
            parser.push_error(Error::new(
                ErrorImpl::UnexpectedToken {
                    kind,
                    message: String::from("literal token without a value"),
                },
                span.start,
            ));
            return None;
        }
    };

    Some(expr)
}

/// A property name, or a method call on the root object when followed by `(`.
pub fn parse_identifier_expr(parser: &mut Parser) -> Option<ExprWrapper> {
    if parser.peek_token_is(TokenKind::OpenParen) {
        return parse_call(parser);
    }

    let token = parser.advance();
    Some(ExprWrapper::new(PropertyExpr {
        name: token.value,
        span: token.span,
    }))
}

/// `#name`, `#{ ... }` or `#@Class@{ ... }`.
pub fn parse_hash_expr(parser: &mut Parser) -> Option<ExprWrapper> {
    if parser.current_token().value != "#" {
        let token = parser.advance();
        return Some(ExprWrapper::new(VariableExpr {
            name: token.hash_name().to_string(),
            span: token.span,
        }));
    }

    let start = parser.get_position();

    let class_name = if parser.peek_token_is(TokenKind::At) {
        parser.next_token();
        parser.next_token();
        let (class_name, _) = parse_class_name(parser)?;
        parser.expect(TokenKind::At)?;
        Some(class_name)
    } else if parser.expect_peek(TokenKind::OpenCurly) {
        None
    } else {
        return None;
    };

    let (entries, end) = parse_map_entries(parser)?;

    Some(ExprWrapper::new(MapExpr {
        entries,
        class_name,
        span: span_between(&start, &end),
    }))
}

pub fn parse_illegal_expr(parser: &mut Parser) -> Option<ExprWrapper> {
    let token = parser.current_token();
    let error = Error::new(
        ErrorImpl::IllegalToken {
            token: token.value.clone(),
        },
        token.start(),
    );
    parser.push_error(error);
    None
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Option<ExprWrapper> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Some(expr)
}

/// `[expr]`, at the start of an expression or as a chain step.
pub fn parse_index_expr(parser: &mut Parser) -> Option<ExprWrapper> {
    let start = parser.advance().span.start;
    let index = parse_expr(parser, BindingPower::Default)?;
    let end = parser.expect(TokenKind::CloseBracket)?.span.end;

    Some(ExprWrapper::new(IndexExpr {
        index,
        span: span_between(&start, &end),
    }))
}

pub fn parse_dynamic_subscript_expr(parser: &mut Parser) -> Option<ExprWrapper> {
    let token = parser.advance();

    match token.literal.as_ref().and_then(Literal::as_subscript) {
        Some(subscript) => Some(ExprWrapper::new(DynamicSubscriptExpr {
            subscript,
            span: token.span,
        })),
        None => {
            parser.push_error(Error::new(
                ErrorImpl::IllegalToken {
                    token: token.value.clone(),
                },
                token.start(),
            ));
            None
        }
    }
}

/// `{ a, b, c }`
pub fn parse_list_expr(parser: &mut Parser) -> Option<ExprWrapper> {
    let start = parser.advance().span.start;
    let (elements, end) = parse_arguments(parser, TokenKind::CloseCurly)?;

    Some(ExprWrapper::new(ListExpr {
        elements,
        span: span_between(&start, &end),
    }))
}

/// `new C(args)`, `new C[]{ elements }` or `new C[size]`.
pub fn parse_constructor_expr(parser: &mut Parser) -> Option<ExprWrapper> {
    let start = parser.advance().span.start;
    let (class_name, _) = parse_class_name(parser)?;

    let (kind, end) = match parser.current_token_kind() {
        TokenKind::OpenParen => {
            parser.next_token();
            let (arguments, end) = parse_arguments(parser, TokenKind::CloseParen)?;
            (ConstructorKind::Call(arguments), end)
        }
        TokenKind::OpenBracket if parser.peek_token_is(TokenKind::CloseBracket) => {
            parser.next_token();
            parser.next_token();
            parser.expect(TokenKind::OpenCurly)?;
            let (elements, end) = parse_arguments(parser, TokenKind::CloseCurly)?;
            (ConstructorKind::ArrayInit(elements), end)
        }
        TokenKind::OpenBracket => {
            parser.next_token();
            let size = parse_expr(parser, BindingPower::Default)?;
            let end = parser.expect(TokenKind::CloseBracket)?.span.end;
            (ConstructorKind::ArraySized(size), end)
        }
        _ => {
            parser.current_error(format!(
                "expected constructor arguments or array dimension after {}",
                class_name
            ));
            return None;
        }
    };

    Some(ExprWrapper::new(ConstructorExpr {
        class_name,
        kind,
        span: span_between(&start, &end),
    }))
}

/// `@Class@field`, `@Class@method(args)` or `@@method(args)`.
pub fn parse_static_expr(parser: &mut Parser) -> Option<ExprWrapper> {
    let start = parser.advance().span.start;

    let class_name = if parser.current_token_is(TokenKind::At) {
        String::from(MATH_CLASS)
    } else {
        parse_class_name(parser)?.0
    };
    parser.expect(TokenKind::At)?;

    let member = parser.expect(TokenKind::Identifier)?;

    if !parser.current_token_is(TokenKind::OpenParen) {
        return Some(ExprWrapper::new(StaticFieldExpr {
            class_name,
            field: member.value,
            span: span_between(&start, &member.span.end),
        }));
    }

    parser.next_token();
    let (arguments, end) = parse_arguments(parser, TokenKind::CloseParen)?;

    Some(ExprWrapper::new(StaticMethodExpr {
        class_name,
        method: member.value,
        arguments,
        span: span_between(&start, &end),
    }))
}

/// `:[ body ]`
pub fn parse_lambda_expr(parser: &mut Parser) -> Option<ExprWrapper> {
    let start = parser.get_position();

    if !parser.expect_peek(TokenKind::OpenBracket) {
        return None;
    }
    parser.next_token();

    let body = parse_expr(parser, BindingPower::Default)?;
    let end = parser.expect(TokenKind::CloseBracket)?.span.end;

    Some(ExprWrapper::new(LambdaExpr {
        body,
        span: span_between(&start, &end),
    }))
}

// NAVIGATION

/// Collects a run of navigation steps following `left` into one chain.
///
/// Handles `.name`, `.method(args)`, `.(expr)`, `.{projection}`, the
/// selections `.{? e}`, `.{^ e}` and `.{$ e}`, `.@Class@member`, `[index]`
/// and dynamic subscripts. `(arg)` applies everything collected so far to
/// `arg` and continues the chain from the result.
pub fn parse_chain_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Option<ExprWrapper> {
    let start = left.get_span().start.clone();
    let mut children = match left.downcast_ref::<ChainExpr>() {
        Some(chain) => chain.children.clone(),
        None => vec![left],
    };

    loop {
        let child = match parser.current_token_kind() {
            TokenKind::Dot => {
                parser.next_token();
                parse_navigation_step(parser)?
            }
            TokenKind::OpenBracket => parse_index_expr(parser)?,
            TokenKind::DynamicSubscript => parse_dynamic_subscript_expr(parser)?,
            TokenKind::OpenParen => {
                parser.next_token();
                let argument = if parser.current_token_is(TokenKind::CloseParen) {
                    None
                } else {
                    Some(parse_expr(parser, BindingPower::Default)?)
                };
                let end = parser.expect(TokenKind::CloseParen)?.span.end;

                let target = collapse_chain(std::mem::take(&mut children), &start);
                ExprWrapper::new(EvalExpr {
                    target,
                    argument,
                    span: span_between(&start, &end),
                })
            }
            _ => break,
        };

        children.push(child);

        if !parser.check_iteration_limit() {
            return None;
        }
    }

    Some(collapse_chain(children, &start))
}

/// A single child stands for itself; several form a chain.
fn collapse_chain(mut children: Vec<ExprWrapper>, start: &Position) -> ExprWrapper {
    if children.len() == 1 {
        if let Some(child) = children.pop() {
            return child;
        }
    }

    let end = children
        .last()
        .map(|child| child.get_span().end.clone())
        .unwrap_or_else(|| start.clone());

    ExprWrapper::new(ChainExpr {
        children,
        span: span_between(start, &end),
    })
}

/// Parses what follows a `.` inside a chain.
fn parse_navigation_step(parser: &mut Parser) -> Option<ExprWrapper> {
    match parser.current_token_kind() {
        TokenKind::Identifier => parse_identifier_expr(parser),
        TokenKind::OpenParen => parse_grouping_expr(parser),
        TokenKind::At => parse_static_expr(parser),
        TokenKind::OpenCurly => {
            let start = parser.advance().span.start;

            let mode = match parser.current_token_kind() {
                TokenKind::Question => Some(SelectionMode::All),
                TokenKind::Xor => Some(SelectionMode::First),
                TokenKind::Dollar => Some(SelectionMode::Last),
                _ => None,
            };
            if mode.is_some() {
                parser.next_token();
            }

            let expression = parse_expr(parser, BindingPower::Default)?;
            let span = span_between(&start, &parser.expect(TokenKind::CloseCurly)?.span.end);

            Some(match mode {
                Some(mode) => ExprWrapper::new(SelectionExpr {
                    expression,
                    mode,
                    span,
                }),
                None => ExprWrapper::new(ProjectionExpr { expression, span }),
            })
        }
        kind => {
            parser.current_error(format!(
                "expected property, method, projection or selection after DOT, got {}",
                kind
            ));
            None
        }
    }
}

/// `name(args)` with the name as the current token.
fn parse_call(parser: &mut Parser) -> Option<ExprWrapper> {
    let name = parser.advance();
    parser.next_token();
    let (arguments, end) = parse_arguments(parser, TokenKind::CloseParen)?;

    Some(ExprWrapper::new(CallExpr {
        method: name.value,
        arguments,
        span: span_between(&name.span.start, &end),
    }))
}

// HELPERS

/// Parses comma separated expressions up to and including `close`.
///
/// The opening delimiter has already been consumed. Returns the items and the
/// end position of `close`.
fn parse_arguments(parser: &mut Parser, close: TokenKind) -> Option<(Vec<ExprWrapper>, Position)> {
    let mut arguments = vec![];

    if parser.current_token_is(close) {
        return Some((arguments, parser.advance().span.end));
    }

    loop {
        if !parser.check_iteration_limit() {
            return None;
        }

        arguments.push(parse_expr(parser, BindingPower::Sequence)?);

        if parser.current_token_is(TokenKind::Comma) {
            parser.next_token();
            continue;
        }

        let end = parser.expect(close)?.span.end;
        return Some((arguments, end));
    }
}

/// Parses `{ key : value, ... }` with the `{` as the current token.
fn parse_map_entries(parser: &mut Parser) -> Option<(MapEntries, Position)> {
    parser.expect(TokenKind::OpenCurly)?;
    let mut entries = vec![];

    if parser.current_token_is(TokenKind::CloseCurly) {
        return Some((entries, parser.advance().span.end));
    }

    loop {
        if !parser.check_iteration_limit() {
            return None;
        }

        let key = parse_expr(parser, BindingPower::Sequence)?;
        let value = if parser.current_token_is(TokenKind::Colon) {
            parser.next_token();
            Some(parse_expr(parser, BindingPower::Sequence)?)
        } else {
            None
        };
        entries.push((key, value));

        if parser.current_token_is(TokenKind::Comma) {
            parser.next_token();
            continue;
        }

        let end = parser.expect(TokenKind::CloseCurly)?.span.end;
        return Some((entries, end));
    }
}

/// Reads a class name such as `java.util.Map` or `Outer$Inner`.
fn parse_class_name(parser: &mut Parser) -> Option<(String, Position)> {
    let first = parser.expect(TokenKind::Identifier)?;
    let mut name = first.value;
    let mut end = first.span.end;

    while parser.current_token().is_one_of_many(&[TokenKind::Dot, TokenKind::Dollar])
        && parser.peek_token_is(TokenKind::Identifier)
    {
        if !parser.check_iteration_limit() {
            return None;
        }

        name.push_str(&parser.advance().value);
        let part = parser.advance();
        name.push_str(&part.value);
        end = part.span.end;
    }

    Some((name, end))
}
