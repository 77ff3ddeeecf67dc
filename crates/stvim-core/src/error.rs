//! Error taxonomy.
//!
//! Each pipeline stage has its own error type. [`Error`] wraps them together with the command
//! text that failed, so a caller can render a precise message without keeping extra context.

use crate::buffer::BufferError;
use crate::command::Command;
use crate::grammar::{LexError, Span, TokenKind, line_column};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// What the parser saw where it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    /// A token of the given class (including [`TokenKind::End`]).
    Token(TokenKind),
    /// A bare word that is not a keyword.
    Word(String),
    /// Text that could not be lexed.
    Invalid(LexError),
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(kind) => write!(f, "{kind}"),
            Found::Word(word) => write!(f, "`{word}`"),
            Found::Invalid(err) => write!(f, "{err}"),
        }
    }
}

/// The input does not match any command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "syntax error at line {line}, column {column}: expected {}, found {found}",
    one_of(.expected)
)]
pub struct SyntaxError {
    /// Byte offset of the furthest position the parser reached.
    pub offset: usize,
    /// 1-based line of `offset`.
    pub line: usize,
    /// 1-based column (in characters) of `offset`.
    pub column: usize,
    /// What was there.
    pub found: Found,
    /// Tokens that would have been accepted at `offset`, sorted and deduplicated.
    pub expected: Vec<TokenKind>,
}

impl SyntaxError {
    pub(crate) fn new(source: &str, offset: usize, found: Found, expected: &[TokenKind]) -> Self {
        let (line, column) = line_column(source, offset);
        let mut expected = expected.to_vec();
        expected.sort();
        expected.dedup();
        Self {
            offset,
            line,
            column,
            found,
            expected,
        }
    }
}

fn one_of(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => "nothing".to_owned(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{} or {last}", head.join(", "))
        }
    }
}

/// The command is well-formed but violates a domain rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// Line numbers are 1-based.
    #[error("line numbers start at 1, got 0")]
    ZeroLineNumber {
        /// Location of the number.
        span: Span,
    },
    /// The digits do not fit a line number.
    #[error("line number {digits} is too large")]
    LineNumberTooLarge {
        /// The digits as written.
        digits: String,
        /// Location of the number.
        span: Span,
    },
    /// `start` is after `end`.
    #[error("line range {start} TO {end} is inverted")]
    InvertedRange {
        /// Range start as written.
        start: usize,
        /// Range end as written.
        end: usize,
        /// Location of the range.
        span: Span,
    },
    /// `FIND ""` or `REPLACE "" WITH ...`.
    #[error("search pattern must not be empty")]
    EmptyPattern {
        /// Location of the literal.
        span: Span,
    },
}

/// The buffer rejected or failed a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{command}: {cause}")]
pub struct ExecutionError {
    /// The command that failed.
    pub command: Command,
    /// The buffer-side failure.
    #[source]
    pub cause: BufferError,
}

impl ExecutionError {
    /// Whether the failure is a line/column reference outside the buffer.
    pub fn is_out_of_range(&self) -> bool {
        self.cause.is_out_of_range()
    }
}

/// Pipeline stage an [`Error`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Lexing and parsing.
    Parse,
    /// Parse tree to command.
    Transform,
    /// Execution against the buffer.
    Dispatch,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Parse => write!(f, "parse"),
            Stage::Transform => write!(f, "transform"),
            Stage::Dispatch => write!(f, "dispatch"),
        }
    }
}

/// Any failure of the parse → transform → dispatch pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input matches no command.
    #[error("cannot parse `{input}`: {error}")]
    Syntax {
        /// The command text.
        input: String,
        /// Details.
        #[source]
        error: SyntaxError,
    },
    /// The command breaks a domain rule.
    #[error("invalid command `{input}`: {error}")]
    Semantic {
        /// The command text.
        input: String,
        /// Details.
        #[source]
        error: SemanticError,
    },
    /// A line or column reference exceeds the buffer.
    #[error("out of range in `{input}`: {error}")]
    OutOfRange {
        /// The command text.
        input: String,
        /// Details.
        #[source]
        error: ExecutionError,
    },
    /// The buffer collaborator failed.
    #[error("failed to execute `{input}`: {error}")]
    Execution {
        /// The command text.
        input: String,
        /// Details.
        #[source]
        error: ExecutionError,
    },
}

impl Error {
    pub(crate) fn dispatch(input: &str, error: ExecutionError) -> Self {
        let input = input.to_owned();
        if error.is_out_of_range() {
            Error::OutOfRange { input, error }
        } else {
            Error::Execution { input, error }
        }
    }

    /// Stage that produced the error.
    pub fn stage(&self) -> Stage {
        match self {
            Error::Syntax { .. } => Stage::Parse,
            Error::Semantic { .. } => Stage::Transform,
            Error::OutOfRange { .. } | Error::Execution { .. } => Stage::Dispatch,
        }
    }

    /// The command text that failed.
    pub fn input(&self) -> &str {
        match self {
            Error::Syntax { input, .. }
            | Error::Semantic { input, .. }
            | Error::OutOfRange { input, .. }
            | Error::Execution { input, .. } => input,
        }
    }
}
