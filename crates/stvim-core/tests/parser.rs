use pretty_assertions::assert_eq;
use stvim_core::grammar::LexError;
use stvim_core::parser::{InsertNode, IntNode, StringKind, StringNode};
use stvim_core::{Found, ParseTree, SyntaxError, TokenKind, parse};

fn syntax_error(source: &str) -> SyntaxError {
    match parse(source) {
        Ok(tree) => panic!("expected a syntax error for {source:?}, got {tree:?}"),
        Err(err) => err,
    }
}

#[test]
fn test_delete_and_delete_lines_are_distinct() {
    assert_eq!(parse("DELETE").unwrap(), ParseTree::DeleteChar { span: 0..6 });

    let ParseTree::DeleteLines(range) = parse("DELETE LINES 1 TO 1").unwrap() else {
        panic!("expected ParseTree::DeleteLines");
    };
    assert_eq!(range.start.digits, "1");
    assert_eq!(range.end.digits, "1");
    assert_eq!(range.span, 13..19);
}

#[test]
fn test_keywords_are_case_insensitive() {
    let upper = parse(r#"INSERT "x" AT LINE 2"#).unwrap();
    let lower = parse(r#"insert "x" at line 2"#).unwrap();
    let mixed = parse(r#"Insert "x" At Line 2"#).unwrap();
    assert_eq!(upper, lower);
    assert_eq!(upper, mixed);
}

#[test]
fn test_insert_with_block_string() {
    let tree = parse("INSERT \"\"\"a\nb\n\"\"\" AT LINE 10").unwrap();
    assert_eq!(
        tree,
        ParseTree::Insert(InsertNode {
            text: StringNode {
                kind: StringKind::Block,
                raw: "a\nb\n".to_string(),
                span: 7..17,
            },
            at_line: Some(IntNode {
                digits: "10".to_string(),
                span: 26..28,
            }),
        })
    );
}

#[test]
fn test_whitespace_between_tokens_is_free() {
    let tree = parse("  GOTO\tLINE\n  7  ").unwrap();
    assert_eq!(
        tree,
        ParseTree::GotoLine(IntNode {
            digits: "7".to_string(),
            span: 14..15,
        })
    );
}

#[test]
fn test_empty_input_expects_a_command() {
    let err = syntax_error("");
    assert_eq!(err.offset, 0);
    assert_eq!(err.found, Found::Token(TokenKind::End));
    assert_eq!(err.expected, vec![
        TokenKind::Visual,
        TokenKind::Insert,
        TokenKind::Delete,
        TokenKind::Goto,
        TokenKind::Find,
        TokenKind::Replace,
    ]);
}

#[test]
fn test_unknown_word_is_named() {
    let err = syntax_error("JUMP 3");
    assert_eq!(err.found, Found::Word("JUMP".to_string()));
    assert_eq!(
        err.to_string(),
        "syntax error at line 1, column 1: expected VISUAL, INSERT, DELETE, GOTO, FIND or REPLACE, found `JUMP`"
    );
}

#[test]
fn test_delete_followed_by_wrong_keyword() {
    let err = syntax_error("DELETE LINE 1 TO 2");
    assert_eq!(err.offset, 7);
    assert_eq!(err.found, Found::Token(TokenKind::Line));
    assert_eq!(err.expected, vec![TokenKind::Lines, TokenKind::End]);
}

#[test]
fn test_insert_missing_line_keyword() {
    let err = syntax_error(r#"INSERT "x" AT 5"#);
    assert_eq!((err.line, err.column), (1, 15));
    assert_eq!(err.found, Found::Token(TokenKind::Int));
    assert_eq!(err.expected, vec![TokenKind::Line]);
    assert_eq!(
        err.to_string(),
        "syntax error at line 1, column 15: expected LINE, found integer"
    );
}

#[test]
fn test_insert_trailing_garbage_offers_at() {
    let err = syntax_error(r#"INSERT "x" 5"#);
    assert_eq!(err.expected, vec![TokenKind::At, TokenKind::End]);
}

#[test]
fn test_find_rejects_block_string() {
    let err = syntax_error("FIND \"\"\"a\"\"\"");
    assert_eq!(err.found, Found::Token(TokenKind::BlockStr));
    assert_eq!(err.expected, vec![TokenKind::Str]);
}

#[test]
fn test_replace_requires_with() {
    let err = syntax_error(r#"REPLACE "a" "b""#);
    assert_eq!(err.offset, 12);
    assert_eq!(err.expected, vec![TokenKind::With]);
}

#[test]
fn test_negative_number_is_a_lexical_error() {
    let err = syntax_error("GOTO LINE -1");
    assert_eq!(err.offset, 10);
    assert_eq!(err.found, Found::Invalid(LexError::UnexpectedCharacter));
    assert_eq!(err.expected, vec![TokenKind::Int]);
}

#[test]
fn test_unterminated_string_is_reported_where_it_starts() {
    let err = syntax_error(r#"INSERT "abc"#);
    assert_eq!(err.offset, 7);
    assert_eq!(err.found, Found::Invalid(LexError::UnterminatedString));
    assert_eq!(err.expected, vec![TokenKind::Str, TokenKind::BlockStr]);
}

#[test]
fn test_extra_tokens_after_command() {
    let err = syntax_error("GOTO LINE 3 4");
    assert_eq!(err.offset, 12);
    assert_eq!(err.expected, vec![TokenKind::End]);
}

#[test]
fn test_error_position_on_second_line() {
    let err = syntax_error("INSERT \"\"\"a\nb\"\"\" AT\nLINE x");
    assert_eq!((err.line, err.column), (3, 6));
    assert_eq!(err.found, Found::Word("x".to_string()));
}
