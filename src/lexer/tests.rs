//! Unit tests for the lexer module.
//!
//! Covers keywords and their symbolic aliases, numeric literals with
//! widths, quoted literals and escapes, operators, dynamic subscripts,
//! positions and the error paths.

use super::{
    lexer::{tokenize, Lexer, LexerOptions},
    tokens::{DynamicSubscript, Literal, NumberLiteral, TokenKind},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source.to_string(), None).map(|t| t.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "and or bor xor band eq neq lt gt lte gte in not shl shr ushr instanceof true false null new".to_string();
    let tokens = tokenize(source, Some("test.ognl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::And);
    assert_eq!(tokens[1].kind, TokenKind::Or);
    assert_eq!(tokens[2].kind, TokenKind::BitOr);
    assert_eq!(tokens[3].kind, TokenKind::Xor);
    assert_eq!(tokens[4].kind, TokenKind::BitAnd);
    assert_eq!(tokens[5].kind, TokenKind::Equals);
    assert_eq!(tokens[6].kind, TokenKind::NotEquals);
    assert_eq!(tokens[7].kind, TokenKind::Less);
    assert_eq!(tokens[8].kind, TokenKind::Greater);
    assert_eq!(tokens[9].kind, TokenKind::LessEquals);
    assert_eq!(tokens[10].kind, TokenKind::GreaterEquals);
    assert_eq!(tokens[11].kind, TokenKind::In);
    assert_eq!(tokens[12].kind, TokenKind::Not);
    assert_eq!(tokens[13].kind, TokenKind::ShiftLeft);
    assert_eq!(tokens[14].kind, TokenKind::ShiftRight);
    assert_eq!(tokens[15].kind, TokenKind::UnsignedShiftRight);
    assert_eq!(tokens[16].kind, TokenKind::Instanceof);
    assert_eq!(tokens[17].kind, TokenKind::True);
    assert_eq!(tokens[18].kind, TokenKind::False);
    assert_eq!(tokens[19].kind, TokenKind::Null);
    assert_eq!(tokens[20].kind, TokenKind::New);
    assert_eq!(tokens[21].kind, TokenKind::EOF);
}

#[test]
fn test_keyword_aliases_match_symbols() {
    assert_eq!(kinds("a and b"), kinds("a && b"));
    assert_eq!(kinds("a or b"), kinds("a || b"));
    assert_eq!(kinds("x eq y"), kinds("x == y"));
    assert_eq!(kinds("x neq y"), kinds("x != y"));
    assert_eq!(kinds("x lt y gt z"), kinds("x < y > z"));
    assert_eq!(kinds("x lte y gte z"), kinds("x <= y >= z"));
    assert_eq!(kinds("a bor b xor c band d"), kinds("a | b ^ c & d"));
    assert_eq!(kinds("a shl b shr c ushr d"), kinds("a << b >> c >>> d"));
    assert_eq!(kinds("not a"), kinds("!a"));
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase notable inside".to_string();
    let tokens = tokenize(source, None).unwrap();

    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["foo", "bar", "baz_123", "_underscore", "CamelCase", "notable", "inside", ""]
    );
    assert!(tokens[..7].iter().all(|t| t.kind == TokenKind::Identifier));
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_hex_literal() {
    let tokens = tokenize("0x1F".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[0].value, "0x1F");
    assert_eq!(tokens[0].literal.as_ref().and_then(|l| l.as_i64()), Some(31));
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_float_with_exponent() {
    let tokens = tokenize("1.5e-2".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[0].value, "1.5e-2");
    assert_eq!(
        tokens[0].literal,
        Some(Literal::Number(NumberLiteral::Double(0.015)))
    );
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 2.75 0 017 1e3 .5 5.".to_string(), None).unwrap();

    let literals: Vec<Option<Literal>> = tokens.iter().map(|t| t.literal.clone()).collect();
    assert_eq!(literals[0], Some(Literal::Number(NumberLiteral::Int(42))));
    assert_eq!(literals[1], Some(Literal::Number(NumberLiteral::Double(2.75))));
    assert_eq!(literals[2], Some(Literal::Number(NumberLiteral::Int(0))));
    assert_eq!(literals[3], Some(Literal::Number(NumberLiteral::Int(15))));
    assert_eq!(literals[4], Some(Literal::Number(NumberLiteral::Double(1000.0))));
    assert_eq!(literals[5], Some(Literal::Number(NumberLiteral::Double(0.5))));
    assert_eq!(literals[6], Some(Literal::Number(NumberLiteral::Double(5.0))));

    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[1].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[3].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[4].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[6].value, "5.");
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_number_suffixes_keep_category() {
    let tokens = tokenize("10L 7H 2.5f 3d 4.0B 0xFFl".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[0].value, "10L");
    assert_eq!(tokens[0].literal, Some(Literal::Number(NumberLiteral::Long(10))));

    assert_eq!(tokens[1].literal, Some(Literal::Number(NumberLiteral::BigInteger(7))));

    assert_eq!(tokens[2].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[2].literal, Some(Literal::Number(NumberLiteral::Float(2.5))));

    // the suffix picks the width, the category stays integer
    assert_eq!(tokens[3].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[3].literal, Some(Literal::Number(NumberLiteral::Double(3.0))));

    assert_eq!(tokens[4].literal, Some(Literal::Number(NumberLiteral::BigDecimal(4.0))));
    assert_eq!(tokens[5].literal, Some(Literal::Number(NumberLiteral::Long(255))));
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_number_followed_by_navigation() {
    assert_eq!(
        kinds("5.toString()"),
        vec![
            TokenKind::IntLiteral,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_invalid_numbers() {
    let mut lexer = Lexer::new("99999999999999999999 08 1e".to_string(), None);
    let tokens: Vec<_> = lexer.by_ref().collect();

    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert_eq!(tokens[0].value, "99999999999999999999");
    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].value, "08");
    assert_eq!(tokens[2].kind, TokenKind::Illegal);
    assert_eq!(tokens[2].value, "1e");
    assert_eq!(tokens[3].kind, TokenKind::EOF);

    assert_eq!(lexer.errors().len(), 3);
    assert!(lexer.errors().iter().all(|e| e.get_error_name() == "NumberParseError"));
}

#[test]
fn test_hex_overflow_is_illegal() {
    let mut lexer = Lexer::new("0xFFFFFFFFFFFFFFFF 0x7FFFFFFFFFFFFFFF".to_string(), None);
    let tokens: Vec<_> = lexer.by_ref().collect();

    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert_eq!(tokens[0].value, "0xFFFFFFFFFFFFFFFF");
    assert_eq!(tokens[1].kind, TokenKind::IntLiteral);
    assert_eq!(
        tokens[1].literal,
        Some(Literal::Number(NumberLiteral::Int(i64::MAX)))
    );

    assert_eq!(lexer.errors().len(), 1);
    assert_eq!(lexer.errors()[0].get_error_name(), "NumberParseError");
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" "world" "multiple words""#.to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].value, "\"hello\"");
    assert_eq!(tokens[0].literal.as_ref().and_then(|l| l.as_str()), Some("hello"));
    assert_eq!(tokens[2].literal.as_ref().and_then(|l| l.as_str()), Some("multiple words"));
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_string_newline_escape() {
    let tokens = tokenize(r#""hello\n""#.to_string(), None).unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    let decoded = tokens[0].literal.as_ref().and_then(|l| l.as_str()).unwrap();
    assert_eq!(decoded.chars().count(), 6);
    assert_eq!(decoded.chars().last(), Some('\n'));
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""tab\there" "back\\slash" "hex\x41" "uni\u00e9" "oct\101\0" "q\"\'""#.to_string();
    let tokens = tokenize(source, None).unwrap();

    let decoded: Vec<&str> = tokens[..6]
        .iter()
        .map(|t| t.literal.as_ref().and_then(|l| l.as_str()).unwrap())
        .collect();

    assert_eq!(decoded[0], "tab\there");
    assert_eq!(decoded[1], "back\\slash");
    assert_eq!(decoded[2], "hexA");
    assert_eq!(decoded[3], "uni\u{e9}");
    assert_eq!(decoded[4], "octA\0");
    assert_eq!(decoded[5], "q\"'");
}

#[test]
fn test_char_literals() {
    let tokens = tokenize(r#"'a' '\n' 'key' `b`"#.to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[0].literal, Some(Literal::Char('a')));
    assert_eq!(tokens[1].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[1].literal, Some(Literal::Char('\n')));
    assert_eq!(tokens[2].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[2].literal, Some(Literal::String("key".to_string())));
    assert_eq!(tokens[3].kind, TokenKind::BackCharLiteral);
    assert_eq!(tokens[3].value, "`b`");
    assert_eq!(tokens[3].literal, Some(Literal::Char('b')));
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new("\"abc".to_string(), None);

    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::Illegal);
    assert_eq!(token.value, "\"abc");
    assert_eq!(lexer.errors().len(), 1);
    assert_eq!(lexer.errors()[0].get_error_name(), "UnterminatedLiteral");

    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
    assert_eq!(lexer.errors().len(), 1);
}

#[test]
fn test_invalid_escape() {
    let mut lexer = Lexer::new(r#""a\qb" x"#.to_string(), None);

    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::Illegal);
    assert_eq!(token.value, r#""a\qb""#);
    assert_eq!(lexer.next_token().value, "x");
    assert_eq!(lexer.errors()[0].get_error_name(), "InvalidEscape");
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % == != < > <= >= = && || & | ^ ~ ! << >> >>>"),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Multiply,
            TokenKind::Divide,
            TokenKind::Modulo,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assign,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::BitAnd,
            TokenKind::BitOr,
            TokenKind::Xor,
            TokenKind::BitNot,
            TokenKind::Not,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::UnsignedShiftRight,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_longest_operator_match() {
    let tokens = tokenize(">>>".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::UnsignedShiftRight);
    assert_eq!(tokens[0].value, ">>>");

    assert_eq!(
        kinds(">>>>"),
        vec![TokenKind::UnsignedShiftRight, TokenKind::Greater, TokenKind::EOF]
    );
    assert_eq!(kinds("a>=b"), vec![TokenKind::Identifier, TokenKind::GreaterEquals, TokenKind::Identifier, TokenKind::EOF]);
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] . , ; : ? # @ $"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Question,
            TokenKind::Hash,
            TokenKind::At,
            TokenKind::Dollar,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_not_in() {
    let tokens = tokenize("a not in b".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].kind, TokenKind::NotIn);
    assert_eq!(tokens[1].value, "not in");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "b");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_not_without_in() {
    assert_eq!(
        kinds("not inside"),
        vec![TokenKind::Not, TokenKind::Identifier, TokenKind::EOF]
    );
    assert_eq!(
        kinds("x not\n  in y"),
        vec![TokenKind::Identifier, TokenKind::NotIn, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_dynamic_subscripts() {
    let tokens = tokenize("list[^]".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "list");
    assert_eq!(tokens[1].kind, TokenKind::DynamicSubscript);
    assert_eq!(tokens[1].value, "[^]");
    assert_eq!(
        tokens[1].literal.as_ref().and_then(|l| l.as_subscript()),
        Some(DynamicSubscript::First)
    );

    let subscripts: Vec<_> = tokenize("[|] [$] [*]".to_string(), None)
        .unwrap()
        .into_iter()
        .filter_map(|t| t.literal.and_then(|l| l.as_subscript()))
        .collect();
    assert_eq!(
        subscripts,
        vec![DynamicSubscript::Mid, DynamicSubscript::Last, DynamicSubscript::All]
    );
}

#[test]
fn test_bracket_is_not_a_subscript() {
    assert_eq!(
        kinds("a[ ^ ]"),
        vec![
            TokenKind::Identifier,
            TokenKind::OpenBracket,
            TokenKind::Xor,
            TokenKind::CloseBracket,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_hash_forms() {
    let tokens = tokenize("#this.name #root #user #{".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::This);
    assert_eq!(tokens[1].kind, TokenKind::Dot);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "name");
    assert_eq!(tokens[3].kind, TokenKind::Root);
    assert_eq!(tokens[4].kind, TokenKind::Hash);
    assert_eq!(tokens[4].value, "#user");
    assert_eq!(tokens[4].hash_name(), "user");
    assert_eq!(tokens[5].kind, TokenKind::Hash);
    assert_eq!(tokens[5].value, "#");
    assert_eq!(tokens[6].kind, TokenKind::OpenCurly);
}

#[test]
fn test_positions() {
    let tokens = tokenize("a +\n  bc".to_string(), None).unwrap();

    assert_eq!((tokens[0].line, tokens[0].column, tokens[0].position()), (1, 1, 0));
    assert_eq!((tokens[1].line, tokens[1].column, tokens[1].position()), (1, 3, 2));
    assert_eq!((tokens[2].line, tokens[2].column, tokens[2].position()), (2, 3, 6));
    assert_eq!(tokens[2].span.end.0, 8);

    for pair in tokens.windows(2) {
        assert!(pair[1].position() > pair[0].position());
    }
}

#[test]
fn test_eof_is_idempotent() {
    let mut lexer = Lexer::new("x".to_string(), None);

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    for _ in 0..5 {
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::EOF);
        assert_eq!(token.position(), 1);
    }
    assert_eq!(lexer.current_position().0, 1);
}

#[test]
fn test_iterator_stops_after_eof() {
    let lexer = Lexer::new("a b".to_string(), None);
    assert_eq!(lexer.count(), 3);
}

#[test]
fn test_illegal_character_advances_once() {
    let mut lexer = Lexer::new("a \\ b".to_string(), Some("test.ognl".to_string()));
    let tokens: Vec<_> = lexer.by_ref().collect();

    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].value, "\\");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(lexer.errors().len(), 1);
    assert_eq!(lexer.errors()[0].get_position().0, 2);
    assert_eq!(lexer.errors()[0].get_position().1.as_str(), "test.ognl");

    let err = tokenize("a \\ b".to_string(), None).unwrap_err();
    assert_eq!(err.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_whitespace_mode() {
    let lexer = Lexer::with_options(
        "a  b".to_string(),
        LexerOptions {
            emit_whitespace: true,
            ..LexerOptions::default()
        },
    );
    let tokens: Vec<_> = lexer.collect();

    assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    assert_eq!(tokens[1].value, "  ");
    assert_eq!(tokens[2].value, "b");
}

#[test]
fn test_token_display() {
    let tokens = tokenize("foo".to_string(), None).unwrap();
    assert_eq!(
        tokens[0].to_string(),
        "Token{Type: IDENT, Value: foo, Line: 1, Column: 1}"
    );
}

#[test]
fn test_round_trip_relexes_to_same_kinds() {
    let source = "#root.users.{? #this.age gte 18 and name not in {'a', \"b\"}}[0].name(1.5e-2, 0x1F) >>> 2";
    let tokens = tokenize(source.to_string(), None).unwrap();

    let joined = tokens
        .iter()
        .map(|t| t.value.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    assert_eq!(kinds(&joined), kinds(source));
}
