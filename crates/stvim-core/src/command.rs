//! Validated commands and their execution results.
//!
//! A [`Command`] is plain data: it is produced by the transformer (or built directly by
//! tooling), rendered back to canonical command text with [`std::fmt::Display`], and handed to
//! the dispatcher together with a buffer.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cursor position: 1-based line, 0-based column in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 0-based character column within the line.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// First column of the first line.
    pub fn start() -> Self {
        Self::new(1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column + 1)
    }
}

/// One instruction of the command language.
///
/// Line numbers are 1-based and every range satisfies `start <= end` when the command comes out
/// of the transformer. Commands built by hand are checked by the buffer at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    /// `VISUAL LINES start TO end`
    VisualLines {
        /// First selected line.
        start: usize,
        /// Last selected line (inclusive).
        end: usize,
    },
    /// `INSERT "text" [AT LINE n]`
    Insert {
        /// Text to insert; may contain line breaks.
        text: String,
        /// Target line, or `None` for "below the cursor line".
        at_line: Option<usize>,
    },
    /// `DELETE`
    DeleteChar,
    /// `DELETE LINES start TO end`
    DeleteLines {
        /// First deleted line.
        start: usize,
        /// Last deleted line (inclusive).
        end: usize,
    },
    /// `GOTO LINE n`
    GotoLine {
        /// Target line.
        line: usize,
    },
    /// `FIND "pattern"`
    Find {
        /// Literal text to search for.
        pattern: String,
    },
    /// `REPLACE "old" WITH "new"`
    Replace {
        /// Literal text to replace.
        old: String,
        /// Replacement text.
        new: String,
    },
}

impl Command {
    /// Short lowercase name of the variant, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::VisualLines { .. } => "visual_lines",
            Command::Insert { .. } => "insert",
            Command::DeleteChar => "delete_char",
            Command::DeleteLines { .. } => "delete_lines",
            Command::GotoLine { .. } => "goto_line",
            Command::Find { .. } => "find",
            Command::Replace { .. } => "replace",
        }
    }
}

/// Renders canonical command text that parses back to the same command.
///
/// Text containing a line break is written as a block string; such text must not itself
/// contain `"""` or end with `"`.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::VisualLines { start, end } => write!(f, "VISUAL LINES {start} TO {end}"),
            Command::Insert { text, at_line } => {
                write!(f, "INSERT ")?;
                if text.contains('\n') {
                    write!(f, "\"\"\"{text}\"\"\"")?;
                } else {
                    write_quoted(f, text)?;
                }
                if let Some(line) = at_line {
                    write!(f, " AT LINE {line}")?;
                }
                Ok(())
            }
            Command::DeleteChar => write!(f, "DELETE"),
            Command::DeleteLines { start, end } => write!(f, "DELETE LINES {start} TO {end}"),
            Command::GotoLine { line } => write!(f, "GOTO LINE {line}"),
            Command::Find { pattern } => {
                write!(f, "FIND ")?;
                write_quoted(f, pattern)
            }
            Command::Replace { old, new } => {
                write!(f, "REPLACE ")?;
                write_quoted(f, old)?;
                write!(f, " WITH ")?;
                write_quoted(f, new)
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in text.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            _ => write!(f, "{ch}")?,
        }
    }
    f.write_str("\"")
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let tree = crate::parser::parse(input).map_err(|error| Error::Syntax {
            input: input.to_owned(),
            error,
        })?;
        crate::transform::transform(tree).map_err(|error| Error::Semantic {
            input: input.to_owned(),
            error,
        })
    }
}

/// What `DELETE` removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deletion {
    /// A single grapheme cluster under the cursor.
    Grapheme {
        /// The removed text.
        text: String,
        /// Where it was.
        position: Position,
    },
    /// The active linewise selection.
    Lines {
        /// First removed line.
        start: usize,
        /// Last removed line (inclusive).
        end: usize,
    },
    /// The cursor was past the end of its line and there was no selection.
    Nothing,
}

/// Structured payload of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Lines `start..=end` are selected.
    Selected {
        /// First selected line.
        start: usize,
        /// Last selected line.
        end: usize,
        /// Number of selected lines.
        count: usize,
    },
    /// `count` lines were inserted, the first of them now being `line`.
    Inserted {
        /// Line number of the first inserted line.
        line: usize,
        /// Number of inserted lines.
        count: usize,
    },
    /// `DELETE` removed something (or nothing).
    Deleted {
        /// What was removed.
        deletion: Deletion,
    },
    /// Lines `start..=end` were removed.
    LinesDeleted {
        /// First removed line.
        start: usize,
        /// Last removed line.
        end: usize,
        /// Number of removed lines.
        count: usize,
    },
    /// The cursor moved to `line`.
    Moved {
        /// New cursor line.
        line: usize,
    },
    /// The pattern was found and the cursor moved onto it.
    Found {
        /// Where the match starts.
        position: Position,
        /// The search had to restart from the top of the buffer.
        wrapped: bool,
    },
    /// The pattern does not occur in the buffer.
    NotFound,
    /// `count` occurrences were replaced.
    Replaced {
        /// Number of replacements (zero is a valid outcome).
        count: usize,
    },
}

/// Result of dispatching one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// The command that ran.
    pub command: Command,
    /// What it did.
    pub outcome: Outcome,
}

impl ExecutionResult {
    fn pattern(&self) -> &str {
        match &self.command {
            Command::Find { pattern } => pattern,
            _ => "",
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Selected { start, end, count } => {
                write!(f, "Selected lines {start} to {end} ({count} {})", plural(*count, "line"))
            }
            Outcome::Inserted { line, count: 1 } => write!(f, "Inserted 1 line at line {line}"),
            Outcome::Inserted { line, count } => {
                write!(f, "Inserted {count} lines starting at line {line}")
            }
            Outcome::Deleted { deletion } => match deletion {
                Deletion::Grapheme { text, position } => {
                    write!(f, "Deleted {text:?} at {position}")
                }
                Deletion::Lines { start, end } => {
                    write!(f, "Deleted selected lines {start} to {end}")
                }
                Deletion::Nothing => write!(f, "Nothing to delete"),
            },
            Outcome::LinesDeleted { start, end, count } => {
                write!(f, "Deleted lines {start} to {end} ({count} {})", plural(*count, "line"))
            }
            Outcome::Moved { line } => write!(f, "Moved to line {line}"),
            Outcome::Found { position, wrapped } => {
                write!(f, "Found {:?} at {position}", self.pattern())?;
                if *wrapped {
                    write!(f, " (search wrapped to top)")?;
                }
                Ok(())
            }
            Outcome::NotFound => write!(f, "Pattern {:?} not found", self.pattern()),
            Outcome::Replaced { count } => match &self.command {
                Command::Replace { old, new } => write!(
                    f,
                    "Replaced {count} {} of {old:?} with {new:?}",
                    plural(*count, "occurrence")
                ),
                _ => write!(f, "Replaced {count} {}", plural(*count, "occurrence")),
            },
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_owned()
    } else {
        format!("{noun}s")
    }
}
