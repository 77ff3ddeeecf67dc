//! Command execution against a [`Buffer`].
//!
//! The dispatcher keeps no state between calls. The buffer is passed to every call, so the same
//! dispatcher can drive any number of buffers and tests can hand it a fake.

use crate::buffer::{Buffer, BufferError};
use crate::command::{Command, ExecutionResult, Outcome, Position};
use crate::error::ExecutionError;
use tracing::{debug, warn};

/// Dispatcher settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// When `FIND` reaches the end of the buffer without a match, search again from the top.
    pub wrap_search: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { wrap_search: true }
    }
}

/// Maps each [`Command`] to buffer calls.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: DispatchConfig,
}

impl Dispatcher {
    /// Create a dispatcher with the given settings.
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    /// Current settings.
    pub fn config(&self) -> DispatchConfig {
        self.config
    }

    /// Execute `command` against `buffer`.
    ///
    /// Multi-step commands stop at the first failing step; nothing is retried or rolled back.
    pub fn dispatch<B>(
        &self,
        command: &Command,
        buffer: &mut B,
    ) -> Result<ExecutionResult, ExecutionError>
    where
        B: Buffer + ?Sized,
    {
        match self.run(command, buffer) {
            Ok(outcome) => {
                debug!(command = command.name(), ?outcome, "dispatched");
                Ok(ExecutionResult {
                    command: command.clone(),
                    outcome,
                })
            }
            Err(cause) => {
                warn!(command = command.name(), error = %cause, "buffer rejected command");
                Err(ExecutionError {
                    command: command.clone(),
                    cause,
                })
            }
        }
    }

    fn run<B>(&self, command: &Command, buffer: &mut B) -> Result<Outcome, BufferError>
    where
        B: Buffer + ?Sized,
    {
        match command {
            Command::VisualLines { start, end } => {
                let count = range_len(*start, *end)?;
                buffer.select_lines(*start, *end)?;
                Ok(Outcome::Selected {
                    start: *start,
                    end: *end,
                    count,
                })
            }
            Command::Insert { text, at_line } => {
                if let Some(line) = at_line {
                    buffer.set_cursor(Position::new(*line, 0))?;
                }
                let lines = split_lines(text);
                let line = buffer.insert_lines(*at_line, &lines)?;
                Ok(Outcome::Inserted {
                    line,
                    count: lines.len(),
                })
            }
            Command::DeleteChar => Ok(Outcome::Deleted {
                deletion: buffer.delete_char_or_selection()?,
            }),
            Command::DeleteLines { start, end } => {
                let count = range_len(*start, *end)?;
                buffer.delete_lines(*start, *end)?;
                Ok(Outcome::LinesDeleted {
                    start: *start,
                    end: *end,
                    count,
                })
            }
            Command::GotoLine { line } => {
                let line_count = buffer.line_count()?;
                if *line == 0 || *line > line_count {
                    return Err(BufferError::LineOutOfRange {
                        line: *line,
                        line_count,
                    });
                }
                buffer.set_cursor(Position::new(*line, 0))?;
                Ok(Outcome::Moved { line: *line })
            }
            Command::Find { pattern } => self.find(pattern, buffer),
            Command::Replace { old, new } => Ok(Outcome::Replaced {
                count: buffer.replace_all(old, new)?,
            }),
        }
    }

    fn find<B>(&self, pattern: &str, buffer: &mut B) -> Result<Outcome, BufferError>
    where
        B: Buffer + ?Sized,
    {
        let from = buffer.cursor()?;
        let mut wrapped = false;
        let mut hit = buffer.find(pattern, from)?;
        if hit.is_none() && self.config.wrap_search && from != Position::start() {
            wrapped = true;
            hit = buffer.find(pattern, Position::start())?;
        }

        match hit {
            Some(position) => {
                buffer.set_cursor(position)?;
                Ok(Outcome::Found { position, wrapped })
            }
            None => Ok(Outcome::NotFound),
        }
    }
}

/// Number of lines in `start..=end`. Hand-built commands skip the transformer, so the range is
/// checked here before any buffer call.
fn range_len(start: usize, end: usize) -> Result<usize, BufferError> {
    if start == 0 || start > end {
        return Err(BufferError::InvalidRange { start, end });
    }
    Ok(end - start + 1)
}

/// Split insert text into buffer lines. A final newline does not start an extra line, empty
/// text is one empty line, and CRLF breaks count as one break.
fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return vec![""];
    }
    text.split_terminator('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{range_len, split_lines};

    #[test]
    fn split_lines_ignores_one_final_newline() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
        assert_eq!(split_lines("\na"), vec!["", "a"]);
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[test]
    fn split_lines_handles_crlf() {
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\n\r\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn range_len_rejects_bad_ranges() {
        assert_eq!(range_len(2, 4), Ok(3));
        assert!(range_len(0, 4).is_err());
        assert!(range_len(5, 4).is_err());
    }
}
