//! Splitting command scripts into single commands.

const BLOCK_QUOTE: &str = "\"\"\"";

/// One command per line, except that a block string keeps collecting lines until it is closed.
/// Blank lines and lines starting with `#` are skipped outside block strings. An unclosed block
/// string at the end is returned as is so the parser can report it.
pub(crate) fn split_commands(script: &str) -> Vec<String> {
    let mut commands = Vec::new();
    let mut pending: Option<String> = None;

    for line in script.lines() {
        if let Some(mut command) = pending.take() {
            command.push('\n');
            command.push_str(line);
            if is_open(&command) {
                pending = Some(command);
            } else {
                commands.push(command);
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if is_open(trimmed) {
            // Whitespace after an opening `"""` is block content.
            pending = Some(line.trim_start().to_owned());
        } else {
            commands.push(trimmed.to_owned());
        }
    }

    commands.extend(pending);
    commands
}

/// An odd number of `"""` means a block string is still open.
fn is_open(command: &str) -> bool {
    command.matches(BLOCK_QUOTE).count() % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::split_commands;
    use pretty_assertions::assert_eq;

    #[test]
    fn one_command_per_line() {
        let script = "GOTO LINE 2\n\n  # a comment\nDELETE\n";
        assert_eq!(split_commands(script), vec!["GOTO LINE 2", "DELETE"]);
    }

    #[test]
    fn block_string_spans_lines() {
        let script = "INSERT \"\"\"first\n\n# not a comment\n\"\"\" AT LINE 3\nGOTO LINE 1";
        assert_eq!(split_commands(script), vec![
            "INSERT \"\"\"first\n\n# not a comment\n\"\"\" AT LINE 3",
            "GOTO LINE 1",
        ]);
    }

    #[test]
    fn closed_block_string_on_one_line() {
        assert_eq!(split_commands("INSERT \"\"\"x\"\"\"\nDELETE"), vec![
            "INSERT \"\"\"x\"\"\"",
            "DELETE"
        ]);
    }

    #[test]
    fn block_string_keeps_trailing_whitespace_of_first_line() {
        assert_eq!(split_commands("INSERT \"\"\"  \nx\"\"\""), vec![
            "INSERT \"\"\"  \nx\"\"\""
        ]);
        assert_eq!(split_commands("  INSERT \"\"\"a \n b \n\"\"\"  "), vec![
            "INSERT \"\"\"a \n b \n\"\"\"  "
        ]);
    }

    #[test]
    fn unclosed_block_string_is_kept() {
        assert_eq!(split_commands("INSERT \"\"\"a\nb"), vec!["INSERT \"\"\"a\nb"]);
    }

    #[test]
    fn crlf_scripts() {
        assert_eq!(split_commands("GOTO LINE 1\r\nDELETE\r\n"), vec![
            "GOTO LINE 1",
            "DELETE"
        ]);
    }
}
