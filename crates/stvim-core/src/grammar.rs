//! Token vocabulary of the command language.
//!
//! The lexer is generated by [`logos`]. Keywords are matched case-insensitively, whitespace
//! between tokens is skipped, and string literals are scanned by hand so that:
//!
//! - `"""` (a block string) always wins over `"` when three quotes open a literal, and its
//!   content is taken verbatim up to the first following `"""`;
//! - a quoted string never spans a line break.
//!
//! String tokens carry their *raw* interior text. Unescaping is the transformer's job.

use logos::{Lexer, Logos};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Byte range into the command text.
pub type Span = Range<usize>;

/// Lexical failures, reported by the parser as syntax errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that starts no token.
    #[default]
    #[error("unexpected character")]
    UnexpectedCharacter,
    /// A `"` literal without a closing quote on the same line.
    #[error("unterminated string")]
    UnterminatedString,
    /// A `"""` literal without a closing `"""`.
    #[error("unterminated block string")]
    UnterminatedBlockString,
}

/// Tokens of the command language.
#[allow(missing_docs)]
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("visual", ignore(case))]
    Visual,
    #[token("lines", ignore(case))]
    Lines,
    #[token("line", ignore(case))]
    Line,
    #[token("to", ignore(case))]
    To,
    #[token("insert", ignore(case))]
    Insert,
    #[token("at", ignore(case))]
    At,
    #[token("delete", ignore(case))]
    Delete,
    #[token("goto", ignore(case))]
    Goto,
    #[token("find", ignore(case))]
    Find,
    #[token("replace", ignore(case))]
    Replace,
    #[token("with", ignore(case))]
    With,

    /// Unsigned decimal digits, kept as text so overflow is a semantic error.
    #[regex("[0-9]+", |lex| lex.slice().to_owned())]
    Int(String),

    /// Raw content of a `"..."` literal (escapes not yet processed).
    #[token("\"", lex_quoted)]
    Str(String),

    /// Verbatim content of a `"""..."""` literal.
    #[token("\"\"\"", lex_block)]
    BlockStr(String),

    /// Any other bare word. Never valid in a command; lexed so the error names the word.
    #[regex("[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Word(String),
}

fn lex_quoted(lex: &mut Lexer<Token>) -> Result<String, LexError> {
    let rest = lex.remainder();
    let mut chars = rest.char_indices();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => {
                let raw = rest[..idx].to_owned();
                lex.bump(idx + 1);
                return Ok(raw);
            }
            '\\' => match chars.next() {
                None | Some((_, '\n')) => break,
                Some(_) => {}
            },
            '\n' => break,
            _ => {}
        }
    }
    Err(LexError::UnterminatedString)
}

fn lex_block(lex: &mut Lexer<Token>) -> Result<String, LexError> {
    let rest = lex.remainder();
    let Some(end) = rest.find("\"\"\"") else {
        return Err(LexError::UnterminatedBlockString);
    };
    let raw = rest[..end].to_owned();
    lex.bump(end + 3);
    Ok(raw)
}

/// Token classes, used to describe what the parser found and what it expected.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Visual,
    Lines,
    Line,
    To,
    Insert,
    At,
    Delete,
    Goto,
    Find,
    Replace,
    With,
    Int,
    Str,
    BlockStr,
    Word,
    /// End of the command text.
    End,
}

impl TokenKind {
    /// Keywords that may start a command.
    pub const COMMAND_STARTS: [TokenKind; 6] = [
        TokenKind::Visual,
        TokenKind::Insert,
        TokenKind::Delete,
        TokenKind::Goto,
        TokenKind::Find,
        TokenKind::Replace,
    ];
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Visual => "VISUAL",
            TokenKind::Lines => "LINES",
            TokenKind::Line => "LINE",
            TokenKind::To => "TO",
            TokenKind::Insert => "INSERT",
            TokenKind::At => "AT",
            TokenKind::Delete => "DELETE",
            TokenKind::Goto => "GOTO",
            TokenKind::Find => "FIND",
            TokenKind::Replace => "REPLACE",
            TokenKind::With => "WITH",
            TokenKind::Int => "integer",
            TokenKind::Str => "string",
            TokenKind::BlockStr => "block string",
            TokenKind::Word => "word",
            TokenKind::End => "end of input",
        };
        f.write_str(text)
    }
}

impl Token {
    /// Class of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Visual => TokenKind::Visual,
            Token::Lines => TokenKind::Lines,
            Token::Line => TokenKind::Line,
            Token::To => TokenKind::To,
            Token::Insert => TokenKind::Insert,
            Token::At => TokenKind::At,
            Token::Delete => TokenKind::Delete,
            Token::Goto => TokenKind::Goto,
            Token::Find => TokenKind::Find,
            Token::Replace => TokenKind::Replace,
            Token::With => TokenKind::With,
            Token::Int(_) => TokenKind::Int,
            Token::Str(_) => TokenKind::Str,
            Token::BlockStr(_) => TokenKind::BlockStr,
            Token::Word(_) => TokenKind::Word,
        }
    }
}

/// One entry of the command catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSyntax {
    /// Leading keyword(s).
    pub keyword: &'static str,
    /// Arguments following the keyword(s).
    pub arguments: &'static str,
    /// Short description.
    pub description: &'static str,
}

/// Every command form the parser accepts, in grammar order.
pub const COMMAND_SYNTAX: &[CommandSyntax] = &[
    CommandSyntax {
        keyword: "VISUAL LINES",
        arguments: "<start> TO <end>",
        description: "Select an inclusive line range",
    },
    CommandSyntax {
        keyword: "INSERT",
        arguments: "\"text\" [AT LINE <n>]",
        description: "Insert text below the cursor line, or before line n",
    },
    CommandSyntax {
        keyword: "INSERT",
        arguments: "\"\"\"multi-line\"\"\" [AT LINE <n>]",
        description: "Insert several lines verbatim",
    },
    CommandSyntax {
        keyword: "DELETE",
        arguments: "",
        description: "Delete the character under the cursor, or the selection",
    },
    CommandSyntax {
        keyword: "DELETE LINES",
        arguments: "<start> TO <end>",
        description: "Delete an inclusive line range",
    },
    CommandSyntax {
        keyword: "GOTO LINE",
        arguments: "<n>",
        description: "Move the cursor to line n",
    },
    CommandSyntax {
        keyword: "FIND",
        arguments: "\"pattern\"",
        description: "Search forward from the cursor, wrapping at the end",
    },
    CommandSyntax {
        keyword: "REPLACE",
        arguments: "\"old\" WITH \"new\"",
        description: "Replace every occurrence in the buffer",
    },
];

/// 1-based line and column (in characters) of a byte offset.
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut line_start = 0;
    for (idx, ch) in source.char_indices() {
        if idx >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            line_start = idx + 1;
        }
    }
    let column = source
        .get(line_start..offset)
        .map_or(0, |prefix| prefix.chars().count());
    (line, column + 1)
}
