//! Line ending helpers.
//!
//! [`crate::RopeBuffer`] stores text with LF (`'\n'`) newlines and no final newline. When text
//! is loaded from a file, [`TextFormat::split`] records how the file was laid out so
//! [`TextFormat::restore`] can write it back the same way.

/// The newline sequence used when saving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineEnding {
    /// CRLF if the text contains any `"\r\n"`, otherwise LF.
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// The newline sequence itself.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

/// File layout details that the buffer does not keep in its text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextFormat {
    /// Newline sequence.
    pub line_ending: LineEnding,
    /// Whether the file ended with a newline.
    pub trailing_newline: bool,
}

impl TextFormat {
    /// Normalize file content to LF without a final newline, remembering the original layout.
    pub fn split(text: &str) -> (Self, String) {
        let line_ending = LineEnding::detect_in_text(text);
        let mut normalized = match line_ending {
            LineEnding::Lf => text.to_owned(),
            LineEnding::Crlf => text.replace("\r\n", "\n"),
        };
        let trailing_newline = normalized.ends_with('\n');
        if trailing_newline {
            normalized.pop();
        }
        (
            Self {
                line_ending,
                trailing_newline,
            },
            normalized,
        )
    }

    /// Inverse of [`TextFormat::split`] for LF-normalized text.
    pub fn restore(self, text: &str) -> String {
        let mut out = match self.line_ending {
            LineEnding::Lf => text.to_owned(),
            LineEnding::Crlf => text.replace('\n', "\r\n"),
        };
        if self.trailing_newline {
            out.push_str(self.line_ending.as_str());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_and_restore_crlf_with_trailing_newline() {
        let (format, text) = TextFormat::split("a\r\nb\r\n");
        assert_eq!(text, "a\nb");
        assert_eq!(format.line_ending, LineEnding::Crlf);
        assert!(format.trailing_newline);
        assert_eq!(format.restore(&text), "a\r\nb\r\n");
    }

    #[test]
    fn split_lf_without_trailing_newline() {
        let (format, text) = TextFormat::split("a\nb");
        assert_eq!(text, "a\nb");
        assert_eq!(format, TextFormat::default());
        assert_eq!(format.restore("a\nb\nc"), "a\nb\nc");
    }

    #[test]
    fn only_one_final_newline_is_stripped() {
        let (format, text) = TextFormat::split("a\n\n");
        assert_eq!(text, "a\n");
        assert_eq!(format.restore(&text), "a\n\n");
    }
}
