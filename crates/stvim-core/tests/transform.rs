use pretty_assertions::assert_eq;
use stvim_core::{Command, Error, SemanticError, Stage, parse, transform};

fn command(input: &str) -> Command {
    input.parse().unwrap()
}

fn semantic_error(input: &str) -> SemanticError {
    match input.parse::<Command>() {
        Err(Error::Semantic { error, .. }) => error,
        other => panic!("expected a semantic error for {input:?}, got {other:?}"),
    }
}

#[test]
fn test_visual_lines() {
    assert_eq!(command("VISUAL LINES 1 TO 10"), Command::VisualLines {
        start: 1,
        end: 10
    });
    assert_eq!(command("VISUAL LINES 4 TO 4"), Command::VisualLines {
        start: 4,
        end: 4
    });
}

#[test]
fn test_inverted_range_is_rejected() {
    assert_eq!(
        semantic_error("VISUAL LINES 10 TO 1"),
        SemanticError::InvertedRange {
            start: 10,
            end: 1,
            span: 13..20,
        }
    );
    assert!(matches!(
        semantic_error("DELETE LINES 3 TO 2"),
        SemanticError::InvertedRange { start: 3, end: 2, .. }
    ));
}

#[test]
fn test_insert_without_line() {
    assert_eq!(command(r#"INSERT "Hello, World!""#), Command::Insert {
        text: "Hello, World!".to_string(),
        at_line: None,
    });
}

#[test]
fn test_insert_at_line() {
    assert_eq!(command(r#"INSERT "New line" AT LINE 5"#), Command::Insert {
        text: "New line".to_string(),
        at_line: Some(5),
    });
}

#[test]
fn test_block_string_is_verbatim() {
    assert_eq!(command("INSERT \"\"\"a\nb\n\"\"\" AT LINE 10"), Command::Insert {
        text: "a\nb\n".to_string(),
        at_line: Some(10),
    });
    assert_eq!(command("INSERT \"\"\"C:\\\\temp \\\" \"\"\""), Command::Insert {
        text: "C:\\\\temp \\\" ".to_string(),
        at_line: None,
    });
}

#[test]
fn test_quoted_string_escapes() {
    assert_eq!(command(r#"FIND "say \"hi\"""#), Command::Find {
        pattern: r#"say "hi""#.to_string(),
    });
    assert_eq!(command(r#"REPLACE "a\\b" WITH "a\tb""#), Command::Replace {
        old: r"a\b".to_string(),
        new: r"a\tb".to_string(),
    });
}

#[test]
fn test_goto_line_zero() {
    assert_eq!(semantic_error("GOTO LINE 0"), SemanticError::ZeroLineNumber {
        span: 10..11
    });
    assert!(matches!(
        semantic_error(r#"INSERT "x" AT LINE 0"#),
        SemanticError::ZeroLineNumber { .. }
    ));
    assert!(matches!(
        semantic_error("VISUAL LINES 0 TO 3"),
        SemanticError::ZeroLineNumber { .. }
    ));
}

#[test]
fn test_leading_zeros_are_accepted() {
    assert_eq!(command("GOTO LINE 007"), Command::GotoLine { line: 7 });
}

#[test]
fn test_line_number_overflow() {
    let digits = "99999999999999999999999999";
    let err = semantic_error(&format!("GOTO LINE {digits}"));
    assert_eq!(err, SemanticError::LineNumberTooLarge {
        digits: digits.to_string(),
        span: 10..10 + digits.len(),
    });
}

#[test]
fn test_empty_patterns() {
    assert!(matches!(
        semantic_error(r#"FIND """#),
        SemanticError::EmptyPattern { .. }
    ));
    assert!(matches!(
        semantic_error(r#"REPLACE "" WITH "x""#),
        SemanticError::EmptyPattern { .. }
    ));
    assert_eq!(command(r#"REPLACE "x" WITH """#), Command::Replace {
        old: "x".to_string(),
        new: String::new(),
    });
}

#[test]
fn test_empty_insert_is_allowed() {
    assert_eq!(command(r#"INSERT """#), Command::Insert {
        text: String::new(),
        at_line: None,
    });
}

#[test]
fn test_transform_is_deterministic() {
    let input = r#"REPLACE "bug" WITH "feature""#;
    let first = transform(parse(input).unwrap()).unwrap();
    let second = transform(parse(input).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_error_carries_input_and_stage() {
    let err = "GOTO LINE 0".parse::<Command>().unwrap_err();
    assert_eq!(err.stage(), Stage::Transform);
    assert_eq!(err.input(), "GOTO LINE 0");
    assert_eq!(
        err.to_string(),
        "invalid command `GOTO LINE 0`: line numbers start at 1, got 0"
    );

    let err = "GOTO 3".parse::<Command>().unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
}

#[test]
fn test_display_renders_canonical_text() {
    let cases = [
        (Command::VisualLines { start: 2, end: 5 }, "VISUAL LINES 2 TO 5"),
        (Command::DeleteChar, "DELETE"),
        (Command::DeleteLines { start: 1, end: 1 }, "DELETE LINES 1 TO 1"),
        (Command::GotoLine { line: 42 }, "GOTO LINE 42"),
        (
            Command::Insert {
                text: r#"say "hi""#.to_string(),
                at_line: Some(3),
            },
            r#"INSERT "say \"hi\"" AT LINE 3"#,
        ),
        (
            Command::Insert {
                text: "a\nb".to_string(),
                at_line: None,
            },
            "INSERT \"\"\"a\nb\"\"\"",
        ),
        (
            Command::Replace {
                old: r"C:\dir".to_string(),
                new: "x".to_string(),
            },
            r#"REPLACE "C:\\dir" WITH "x""#,
        ),
    ];
    for (command, text) in cases {
        assert_eq!(command.to_string(), text);
        assert_eq!(text.parse::<Command>().unwrap(), command);
    }
}
