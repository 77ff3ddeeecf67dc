//! Built-in demo session.

pub(crate) const DEMO_LINES: [&str; 6] = [
    "Welcome to the DSL demo",
    "Hello World!",
    "This is line 3",
    "Another line here",
    "Sample text for testing",
    "Final line",
];

pub(crate) const DEMO_COMMANDS: [&str; 7] = [
    r#"INSERT "Hello, DSL World!""#,
    r#"INSERT "New line at position 3" AT LINE 3"#,
    "GOTO LINE 2",
    "VISUAL LINES 1 TO 3",
    r#"FIND "Hello""#,
    r#"REPLACE "Hello" WITH "Goodbye""#,
    "DELETE LINES 7 TO 8",
];

#[cfg(test)]
mod tests {
    use super::{DEMO_COMMANDS, DEMO_LINES};
    use pretty_assertions::assert_eq;
    use stvim_core::{BatchPolicy, Engine, RopeBuffer};

    #[test]
    fn demo_session_succeeds() {
        let engine = Engine::default();
        let mut buffer = RopeBuffer::from_lines(DEMO_LINES);

        let results = engine.execute_batch(DEMO_COMMANDS, &mut buffer, BatchPolicy::StopOnError);
        assert_eq!(results.len(), DEMO_COMMANDS.len());
        assert!(results.iter().all(Result::is_ok));
        assert_eq!(buffer.lines(), vec![
            "Welcome to the DSL demo",
            "Goodbye, DSL World!",
            "New line at position 3",
            "Goodbye World!",
            "This is line 3",
            "Another line here",
        ]);
    }
}
