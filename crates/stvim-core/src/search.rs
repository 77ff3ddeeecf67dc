//! Literal text search.
//!
//! Patterns are matched literally (escaped and compiled into a regex) with optional case
//! folding and whole-word matching. All public offsets are **character offsets**, not byte
//! offsets, so they can be used directly as buffer columns.

use regex::{Regex, RegexBuilder};

/// Options that control how a pattern is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, matching is case-sensitive.
    pub case_sensitive: bool,
    /// If `true`, only matches not adjacent to word characters (alphanumeric or `_`) count.
    pub whole_word: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
        }
    }
}

/// A match as a half-open character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl SearchMatch {
    /// `true` for an empty match.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Char <-> byte offset table for one piece of text.
#[derive(Debug)]
struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    fn char_to_byte(&self, char_offset: usize) -> usize {
        let clamped = char_offset.min(self.char_count());
        self.char_to_byte
            .get(clamped)
            .copied()
            .unwrap_or(self.text_len)
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) | Err(idx) => idx,
        }
    }
}

/// A compiled literal pattern.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    options: SearchOptions,
}

impl Matcher {
    /// Compile `pattern`. Returns `Ok(None)` for an empty pattern, which matches nothing.
    pub fn new(pattern: &str, options: SearchOptions) -> Result<Option<Self>, regex::Error> {
        if pattern.is_empty() {
            return Ok(None);
        }
        let regex = RegexBuilder::new(&regex::escape(pattern))
            .case_insensitive(!options.case_sensitive)
            .build()?;
        Ok(Some(Self { regex, options }))
    }

    /// First match in `text` starting at or after character offset `from_char`.
    pub fn find_from(&self, text: &str, from_char: usize) -> Option<SearchMatch> {
        let index = CharIndex::new(text);
        let mut start_char = from_char.min(index.char_count());
        loop {
            let m = self.regex.find_at(text, index.char_to_byte(start_char))?;
            let candidate = SearchMatch {
                start: index.byte_to_char(m.start()),
                end: index.byte_to_char(m.end()),
            };
            if self.accepts(text, &index, candidate) {
                return Some(candidate);
            }
            start_char = candidate.start + 1;
        }
    }

    /// All non-overlapping matches in `text`, left to right.
    pub fn find_all(&self, text: &str) -> Vec<SearchMatch> {
        let index = CharIndex::new(text);
        let mut matches = Vec::new();
        let mut start_char = 0;
        while let Some(m) = self.regex.find_at(text, index.char_to_byte(start_char)) {
            let candidate = SearchMatch {
                start: index.byte_to_char(m.start()),
                end: index.byte_to_char(m.end()),
            };
            if self.accepts(text, &index, candidate) {
                matches.push(candidate);
                start_char = candidate.end;
            } else {
                start_char = candidate.start + 1;
            }
        }
        matches
    }

    fn accepts(&self, text: &str, index: &CharIndex, m: SearchMatch) -> bool {
        if m.is_empty() {
            return false;
        }
        if !self.options.whole_word {
            return true;
        }
        let before = m
            .start
            .checked_sub(1)
            .and_then(|offset| char_at(text, index, offset));
        let after = char_at(text, index, m.end);
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    }
}

fn char_at(text: &str, index: &CharIndex, char_offset: usize) -> Option<char> {
    if char_offset >= index.char_count() {
        return None;
    }
    text.get(index.char_to_byte(char_offset)..)?.chars().next()
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(pattern: &str, case_sensitive: bool, whole_word: bool) -> Matcher {
        Matcher::new(pattern, SearchOptions {
            case_sensitive,
            whole_word,
        })
        .unwrap()
        .unwrap()
    }

    #[test]
    fn empty_pattern_matches_nothing() {
        assert!(Matcher::new("", SearchOptions::default()).unwrap().is_none());
    }

    #[test]
    fn pattern_is_literal() {
        let m = matcher("a.c", true, false);
        assert_eq!(m.find_from("abc a.c", 0), Some(SearchMatch { start: 4, end: 7 }));
    }

    #[test]
    fn offsets_are_in_chars() {
        let m = matcher("bug", true, false);
        assert_eq!(m.find_from("héllo bug", 0), Some(SearchMatch { start: 6, end: 9 }));
    }

    #[test]
    fn find_from_is_inclusive() {
        let m = matcher("ab", true, false);
        assert_eq!(m.find_from("ab ab", 3), Some(SearchMatch { start: 3, end: 5 }));
        assert_eq!(m.find_from("ab ab", 4), None);
    }

    #[test]
    fn case_insensitive() {
        let m = matcher("hello", false, false);
        assert_eq!(m.find_from("say HELLO", 0), Some(SearchMatch { start: 4, end: 9 }));
    }

    #[test]
    fn whole_word_skips_embedded_matches() {
        let m = matcher("foo", true, true);
        assert_eq!(m.find_all("foobar foo barfoo foo"), vec![
            SearchMatch { start: 7, end: 10 },
            SearchMatch { start: 18, end: 21 },
        ]);
    }

    #[test]
    fn find_all_is_non_overlapping() {
        let m = matcher("aa", true, false);
        assert_eq!(m.find_all("aaaaa").len(), 2);
    }
}
