//! The buffer capability the dispatcher drives.
//!
//! An editing host (a remote editor connection, or the in-memory [`crate::RopeBuffer`])
//! implements [`Buffer`]. Calls are synchronous and may block on the host. Exclusive access is
//! the caller's responsibility: the trait takes `&mut self` for every mutation and implementors
//! need no internal locking.

use crate::command::{Deletion, Position};
use thiserror::Error;

/// Failures reported by a [`Buffer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A line number outside `1..=line_count`.
    #[error("line {line} is out of range (buffer has {line_count} lines)")]
    LineOutOfRange {
        /// Requested line.
        line: usize,
        /// Current number of lines.
        line_count: usize,
    },
    /// A column past the end of its line.
    #[error("column {} is out of range for line {line} (length {length})", .column + 1)]
    ColumnOutOfRange {
        /// Line of the position.
        line: usize,
        /// Requested 0-based column.
        column: usize,
        /// Line length in characters.
        length: usize,
    },
    /// A line range with `start > end` or a zero bound.
    #[error("invalid line range {start} to {end}")]
    InvalidRange {
        /// Range start.
        start: usize,
        /// Range end.
        end: usize,
    },
    /// The search pattern could not be compiled.
    #[error("invalid search pattern: {0}")]
    InvalidPattern(String),
    /// The host failed for a reason opaque to the engine (e.g. a dropped connection).
    #[error("buffer host failure: {0}")]
    Host(String),
}

impl BufferError {
    /// Whether this is a line/column/range reference outside the buffer.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            BufferError::LineOutOfRange { .. }
                | BufferError::ColumnOutOfRange { .. }
                | BufferError::InvalidRange { .. }
        )
    }
}

/// Line-oriented text buffer with a cursor and an optional linewise selection.
///
/// Lines are 1-based, columns are 0-based character offsets. A buffer always has at least one
/// (possibly empty) line.
pub trait Buffer {
    /// Number of lines.
    fn line_count(&self) -> Result<usize, BufferError>;

    /// Current cursor position.
    fn cursor(&self) -> Result<Position, BufferError>;

    /// Move the cursor. Clears any selection.
    fn set_cursor(&mut self, position: Position) -> Result<(), BufferError>;

    /// Select lines `start..=end` linewise, leaving the cursor on `end`.
    fn select_lines(&mut self, start: usize, end: usize) -> Result<(), BufferError>;

    /// Insert `lines` before line `at` (`at` may be `line_count + 1` to append), or below the
    /// cursor line when `at` is `None`. Returns the line number of the first inserted line,
    /// where the cursor now is.
    fn insert_lines(&mut self, at: Option<usize>, lines: &[&str]) -> Result<usize, BufferError>;

    /// Delete the active selection, or else the character under the cursor.
    fn delete_char_or_selection(&mut self) -> Result<Deletion, BufferError>;

    /// Delete lines `start..=end`.
    fn delete_lines(&mut self, start: usize, end: usize) -> Result<(), BufferError>;

    /// First occurrence of `pattern` at or after `from`, without wrapping.
    fn find(&self, pattern: &str, from: Position) -> Result<Option<Position>, BufferError>;

    /// Replace every non-overlapping occurrence of `old` with `new`; returns the count.
    fn replace_all(&mut self, old: &str, new: &str) -> Result<usize, BufferError>;
}
