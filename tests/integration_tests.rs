//! Integration tests for the expression front-end.
//!
//! These tests drive the public surface end to end: source text through the
//! lexer and the parser to a rendered tree, plus the error path and the
//! diagnostics renderer.

use ognl::{
    ast::ast::Expr,
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::{DynamicSubscript, Literal, NumberLiteral, Token, TokenKind},
    },
    parser::parser::{parse, MAX_NESTING_DEPTH, MAX_PARSE_ITERATIONS},
    render_error,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source.to_string(), None).map(|t| t.kind).collect()
}

fn render(source: &str) -> String {
    let (parser, expr) = parse(source.to_string(), None);
    assert!(
        parser.errors().is_empty(),
        "unexpected errors for {:?}: {:?}",
        source,
        parser.errors()
    );
    expr.unwrap().render()
}

#[test]
fn test_hex_literal() {
    let tokens = tokenize("0x1F".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[0].value, "0x1F");
    assert_eq!(tokens[0].literal, Some(Literal::Number(NumberLiteral::Int(31))));
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_exponent_literal() {
    let tokens = tokenize("1.5e-2".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[0].literal.as_ref().and_then(Literal::as_f64), Some(0.015));
}

#[test]
fn test_not_in_is_one_token() {
    let tokens = tokenize("a not in b".to_string(), None).unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::NotIn,
            TokenKind::Identifier,
            TokenKind::EOF
        ]
    );
    assert_eq!(tokens[1].value, "not in");
}

#[test]
fn test_dynamic_subscript_token() {
    let tokens = tokenize("list[^]".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].kind, TokenKind::DynamicSubscript);
    assert_eq!(tokens[1].value, "[^]");
    assert_eq!(
        tokens[1].literal,
        Some(Literal::Subscript(DynamicSubscript::First))
    );
}

#[test]
fn test_this_navigation_tokens() {
    assert_eq!(
        kinds("#this.name"),
        vec![
            TokenKind::This,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_unsigned_shift_token() {
    assert_eq!(kinds(">>>"), vec![TokenKind::UnsignedShiftRight, TokenKind::EOF]);
}

#[test]
fn test_string_with_newline_escape() {
    let tokens = tokenize(r#""hello\n""#.to_string(), None).unwrap();
    let text = tokens[0].literal.as_ref().and_then(Literal::as_str).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(text.chars().count(), 6);
    assert!(text.ends_with('\n'));
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new("\"abc".to_string(), None);
    let tokens: Vec<Token> = lexer.by_ref().collect();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].kind, TokenKind::EOF);
    assert_eq!(lexer.errors().len(), 1);
    assert!(lexer.errors()[0].is_lexical());
}

#[test]
fn test_keyword_aliases_match_symbols() {
    let pairs = [
        ("a and b", "a && b"),
        ("a or b", "a || b"),
        ("a bor b", "a | b"),
        ("a xor b", "a ^ b"),
        ("a band b", "a & b"),
        ("a eq b", "a == b"),
        ("a neq b", "a != b"),
        ("a lt b", "a < b"),
        ("a gt b", "a > b"),
        ("a lte b", "a <= b"),
        ("a gte b", "a >= b"),
        ("a shl b", "a << b"),
        ("a shr b", "a >> b"),
        ("a ushr b", "a >>> b"),
        ("not a", "! a"),
    ];

    for (keyword, symbol) in pairs {
        assert_eq!(kinds(keyword), kinds(symbol), "{}", keyword);
        assert_eq!(render(keyword), render(symbol), "{}", keyword);
    }
}

#[test]
fn test_positions_increase() {
    let tokens = tokenize("#root.items[$].{? #this.price > 10L}".to_string(), None).unwrap();

    for pair in tokens.windows(2) {
        if pair[1].kind != TokenKind::EOF {
            assert!(pair[0].position() < pair[1].position());
        }
    }
}

#[test]
fn test_render_round_trip() {
    let sources = [
        "a + b * c - d",
        "(a + b) * c",
        "a ? b : c ? d : e",
        "x = y = 3",
        "a, b, c",
        "#root.items[0].name",
        "list.{? #this.price > 10L}.{name}",
        "list[$] in #set",
        "!(a instanceof java.lang.String)",
        "#{\"k\" : 'v', \"n\"}",
        "new java.util.ArrayList(16).size()",
        "new int[]{1, 2}",
        "@java.lang.Math@max(a, -b)",
        "#fact = :[#this <= 1 ? 1 : #this * #fact(#this - 1)], #fact(5)",
        "`x` + 'y' + \"z\\t\"",
        "foo((a, b))",
    ];

    for source in sources {
        let first = render(source);
        assert_eq!(render(&first), first, "{}", source);
    }
}

#[test]
fn test_node_kinds() {
    let cases = [
        ("a + b", "ASTAdd"),
        ("a % b", "ASTRemainder"),
        ("a >>> b", "ASTUnsignedShiftRight"),
        ("a.b", "ASTChain"),
        ("-a", "ASTNegate"),
        ("a ? b : c", "ASTTest"),
        ("{1}", "ASTList"),
        ("#{1 : 2}", "ASTMap"),
        ("#this", "ASTThisVarRef"),
        ("a instanceof B", "ASTInstanceof"),
        ("@a.B@c", "ASTStaticField"),
        ("42", "ASTConst"),
    ];

    for (source, node_type) in cases {
        let (_, expr) = parse(source.to_string(), None);
        assert_eq!(expr.unwrap().get_node_type(), node_type, "{}", source);
    }
}

#[test]
fn test_error_message_and_snippet() {
    let source = "(a + b";
    let (parser, expr) = parse(source.to_string(), Some("query.ognl".to_string()));

    assert!(expr.is_none());
    assert_eq!(
        parser.errors()[0].to_string(),
        "expected next token to be RPAREN, got EOF instead"
    );

    let rendered = render_error(&parser.errors()[0], source);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "Error: UnexpectedPeek (Expected `RPAREN` here, found `EOF`)");
    assert_eq!(lines[1], "-> query.ognl");
    assert_eq!(lines[3], "1 | (a + b");
    assert_eq!(lines[4], "  | ------^");
}

#[test]
fn test_partial_tree_with_errors() {
    let (parser, expr) = parse("a.b c".to_string(), None);

    assert_eq!(expr.unwrap().render(), "a.b");
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(
        parser.errors()[0].to_string(),
        "at token IDENT: expected end of expression"
    );
}

#[test]
fn test_iteration_guard_reports_instead_of_hanging() {
    let source = format!("a{}", ".b".repeat(MAX_PARSE_ITERATIONS + 1));
    let (parser, expr) = parse(source, None);

    assert!(expr.is_none());
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(
        parser.errors()[0].to_string(),
        "at token DOT: parse iteration limit exceeded (20000), possible infinite loop"
    );
}

#[test]
fn test_nesting_guard_reports_instead_of_overflowing() {
    let source = format!("{}1{}", "(".repeat(9000), ")".repeat(9000));
    let (parser, expr) = parse(source, None);

    assert!(expr.is_none());
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(
        parser.errors()[0].to_string(),
        format!(
            "at token LPAREN: expression nested deeper than {} levels",
            MAX_NESTING_DEPTH
        )
    );
}
