//! In-memory [`Buffer`] backed by a [`Rope`].
//!
//! Text is stored LF-normalized without a final newline, so an empty buffer has exactly one
//! empty line. `ropey` is built without its Unicode/CR line-break features: only `'\n'` breaks a
//! line.

use crate::buffer::{Buffer, BufferError};
use crate::command::{Deletion, Position};
use crate::line_ending::TextFormat;
use crate::search::{Matcher, SearchOptions};
use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

/// A line buffer with a cursor and an optional linewise selection.
#[derive(Debug, Clone)]
pub struct RopeBuffer {
    rope: Rope,
    cursor: Position,
    /// Selected lines, inclusive.
    selection: Option<(usize, usize)>,
    search_options: SearchOptions,
    format: TextFormat,
}

impl Default for RopeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RopeBuffer {
    /// An empty buffer (one empty line).
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: Position::start(),
            selection: None,
            search_options: SearchOptions::default(),
            format: TextFormat::default(),
        }
    }

    /// Load file content. CRLF and a final newline are normalized away and restored by
    /// [`RopeBuffer::to_file_text`].
    pub fn from_text(text: &str) -> Self {
        let (format, normalized) = TextFormat::split(text);
        Self {
            rope: Rope::from_str(&normalized),
            format,
            ..Self::new()
        }
    }

    /// Build a buffer from individual lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for (idx, line) in lines.into_iter().enumerate() {
            if idx > 0 {
                text.push('\n');
            }
            text.push_str(line.as_ref());
        }
        Self {
            rope: Rope::from_str(&text),
            ..Self::new()
        }
    }

    /// Use `options` for `find` and `replace_all`.
    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.search_options = options;
        self
    }

    /// Current search options.
    pub fn search_options(&self) -> SearchOptions {
        self.search_options
    }

    /// Buffer text, LF-separated, without a final newline.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Buffer text with the line ending and final newline it was loaded with.
    pub fn to_file_text(&self) -> String {
        self.format.restore(&self.text())
    }

    /// Number of lines (always at least one).
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of 1-based `line`, without its newline.
    pub fn line(&self, line: usize) -> Option<String> {
        if line == 0 || line > self.len_lines() {
            return None;
        }
        let mut text = self.rope.line(line - 1).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        Some(text)
    }

    /// All lines, in order.
    pub fn lines(&self) -> Vec<String> {
        (1..=self.len_lines())
            .filter_map(|line| self.line(line))
            .collect()
    }

    /// The active linewise selection, if any.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    /// Length of 1-based `line` in characters, excluding the newline.
    fn line_len(&self, line: usize) -> usize {
        let slice = self.rope.line(line - 1);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    fn check_line(&self, line: usize) -> Result<(), BufferError> {
        let line_count = self.len_lines();
        if line == 0 || line > line_count {
            return Err(BufferError::LineOutOfRange { line, line_count });
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), BufferError> {
        if start == 0 || start > end {
            return Err(BufferError::InvalidRange { start, end });
        }
        self.check_line(end)
    }

    fn matcher(&self, pattern: &str) -> Result<Option<Matcher>, BufferError> {
        Matcher::new(pattern, self.search_options)
            .map_err(|err| BufferError::InvalidPattern(err.to_string()))
    }

    /// Keep the cursor inside the text after an edit.
    fn clamp_cursor(&mut self) {
        let line = self.cursor.line.clamp(1, self.len_lines());
        let column = self.cursor.column.min(self.line_len(line));
        self.cursor = Position::new(line, column);
    }
}

impl Buffer for RopeBuffer {
    fn line_count(&self) -> Result<usize, BufferError> {
        Ok(self.len_lines())
    }

    fn cursor(&self) -> Result<Position, BufferError> {
        Ok(self.cursor)
    }

    fn set_cursor(&mut self, position: Position) -> Result<(), BufferError> {
        self.check_line(position.line)?;
        let length = self.line_len(position.line);
        if position.column > length {
            return Err(BufferError::ColumnOutOfRange {
                line: position.line,
                column: position.column,
                length,
            });
        }
        self.selection = None;
        self.cursor = position;
        Ok(())
    }

    fn select_lines(&mut self, start: usize, end: usize) -> Result<(), BufferError> {
        self.check_range(start, end)?;
        self.selection = Some((start, end));
        self.cursor = Position::new(end, 0);
        Ok(())
    }

    fn insert_lines(&mut self, at: Option<usize>, lines: &[&str]) -> Result<usize, BufferError> {
        let line_count = self.len_lines();
        let line = at.unwrap_or(self.cursor.line + 1);
        if line == 0 || line > line_count + 1 {
            return Err(BufferError::LineOutOfRange { line, line_count });
        }
        if lines.is_empty() {
            return Ok(line);
        }

        let joined = lines.join("\n");
        if line <= line_count {
            let char_idx = self.rope.line_to_char(line - 1);
            self.rope.insert(char_idx, &format!("{joined}\n"));
        } else {
            let char_idx = self.rope.len_chars();
            self.rope.insert(char_idx, &format!("\n{joined}"));
        }

        self.selection = None;
        self.cursor = Position::new(line, 0);
        Ok(line)
    }

    fn delete_char_or_selection(&mut self) -> Result<Deletion, BufferError> {
        if let Some((start, end)) = self.selection.take() {
            self.delete_lines(start, end)?;
            return Ok(Deletion::Lines { start, end });
        }

        let Position { line, column } = self.cursor;
        let text = self.line(line).unwrap_or_default();
        let byte = text
            .char_indices()
            .nth(column)
            .map_or(text.len(), |(byte, _)| byte);
        let Some((grapheme_byte, grapheme)) = text
            .grapheme_indices(true)
            .find(|(start, g)| byte < start + g.len())
        else {
            return Ok(Deletion::Nothing);
        };

        let grapheme_column = text[..grapheme_byte].chars().count();
        let line_start = self.rope.line_to_char(line - 1);
        let start = line_start + grapheme_column;
        self.rope.remove(start..start + grapheme.chars().count());

        let position = Position::new(line, grapheme_column);
        self.cursor = position;
        self.clamp_cursor();
        Ok(Deletion::Grapheme {
            text: grapheme.to_owned(),
            position,
        })
    }

    fn delete_lines(&mut self, start: usize, end: usize) -> Result<(), BufferError> {
        self.check_range(start, end)?;
        let line_count = self.len_lines();

        let mut from = self.rope.line_to_char(start - 1);
        let to = if end < line_count {
            self.rope.line_to_char(end)
        } else {
            // Removing the tail also removes the newline that ended the previous line.
            from = from.saturating_sub(1);
            self.rope.len_chars()
        };
        self.rope.remove(from..to);

        self.selection = None;
        self.cursor = Position::new(start, 0);
        self.clamp_cursor();
        Ok(())
    }

    fn find(&self, pattern: &str, from: Position) -> Result<Option<Position>, BufferError> {
        self.check_line(from.line)?;
        let Some(matcher) = self.matcher(pattern)? else {
            return Ok(None);
        };
        for line in from.line..=self.len_lines() {
            let text = self.line(line).unwrap_or_default();
            let from_column = if line == from.line { from.column } else { 0 };
            if let Some(m) = matcher.find_from(&text, from_column) {
                return Ok(Some(Position::new(line, m.start)));
            }
        }
        Ok(None)
    }

    fn replace_all(&mut self, old: &str, new: &str) -> Result<usize, BufferError> {
        let Some(matcher) = self.matcher(old)? else {
            return Ok(0);
        };
        let text = self.text();
        let matches = matcher.find_all(&text);
        if matches.is_empty() {
            return Ok(0);
        }

        // Back to front so earlier offsets stay valid.
        for m in matches.iter().rev() {
            self.rope.remove(m.start..m.end);
            self.rope.insert(m.start, new);
        }

        self.selection = None;
        self.clamp_cursor();
        Ok(matches.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_has_one_line() {
        let buffer = RopeBuffer::new();
        assert_eq!(buffer.len_lines(), 1);
        assert_eq!(buffer.line(1).as_deref(), Some(""));
        assert_eq!(buffer.line(2), None);
    }

    #[test]
    fn from_text_drops_final_newline() {
        let buffer = RopeBuffer::from_text("one\ntwo\n");
        assert_eq!(buffer.lines(), vec!["one", "two"]);
        assert_eq!(buffer.to_file_text(), "one\ntwo\n");
    }

    #[test]
    fn carriage_return_alone_does_not_break_lines() {
        let buffer = RopeBuffer::from_lines(["a\rb", "c"]);
        assert_eq!(buffer.len_lines(), 2);
    }

    #[test]
    fn append_after_last_line() {
        let mut buffer = RopeBuffer::from_lines(["a", "b"]);
        let line = buffer.insert_lines(Some(3), &["c", "d"]).unwrap();
        assert_eq!(line, 3);
        assert_eq!(buffer.lines(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn insert_below_cursor_by_default() {
        let mut buffer = RopeBuffer::from_lines(["a", "b"]);
        let line = buffer.insert_lines(None, &["x"]).unwrap();
        assert_eq!(line, 2);
        assert_eq!(buffer.lines(), vec!["a", "x", "b"]);
        assert_eq!(buffer.cursor().unwrap(), Position::new(2, 0));
    }

    #[test]
    fn delete_last_lines_removes_separator() {
        let mut buffer = RopeBuffer::from_lines(["a", "b", "c"]);
        buffer.delete_lines(2, 3).unwrap();
        assert_eq!(buffer.text(), "a");
        assert_eq!(buffer.cursor().unwrap(), Position::new(1, 0));
    }

    #[test]
    fn delete_every_line_leaves_one_empty_line() {
        let mut buffer = RopeBuffer::from_lines(["a", "b"]);
        buffer.delete_lines(1, 2).unwrap();
        assert_eq!(buffer.lines(), vec![""]);
    }

    #[test]
    fn delete_char_removes_whole_grapheme() {
        let mut buffer = RopeBuffer::from_lines(["ae\u{301}z"]);
        buffer.set_cursor(Position::new(1, 1)).unwrap();
        let deletion = buffer.delete_char_or_selection().unwrap();
        assert_eq!(deletion, Deletion::Grapheme {
            text: "e\u{301}".to_owned(),
            position: Position::new(1, 1),
        });
        assert_eq!(buffer.text(), "az");
    }

    #[test]
    fn delete_char_at_end_of_line_is_nothing() {
        let mut buffer = RopeBuffer::from_lines(["ab"]);
        buffer.set_cursor(Position::new(1, 2)).unwrap();
        assert_eq!(buffer.delete_char_or_selection().unwrap(), Deletion::Nothing);
        assert_eq!(buffer.text(), "ab");
    }

    #[test]
    fn set_cursor_checks_column() {
        let mut buffer = RopeBuffer::from_lines(["ab"]);
        let err = buffer.set_cursor(Position::new(1, 3)).unwrap_err();
        assert!(matches!(err, BufferError::ColumnOutOfRange { length: 2, .. }));
    }

    #[test]
    fn find_does_not_wrap() {
        let buffer = RopeBuffer::from_lines(["needle", "hay"]);
        assert_eq!(buffer.find("needle", Position::new(2, 0)).unwrap(), None);
        assert_eq!(
            buffer.find("needle", Position::start()).unwrap(),
            Some(Position::new(1, 0))
        );
    }

    #[test]
    fn replace_all_clamps_cursor() {
        let mut buffer = RopeBuffer::from_lines(["abcdef"]);
        buffer.set_cursor(Position::new(1, 6)).unwrap();
        assert_eq!(buffer.replace_all("cdef", "x").unwrap(), 1);
        assert_eq!(buffer.text(), "abx");
        assert_eq!(buffer.cursor().unwrap(), Position::new(1, 3));
    }
}
