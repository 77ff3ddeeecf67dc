//! Recursive-descent parser.
//!
//! The grammar is LL(1): every decision, including `DELETE` versus `DELETE LINES`, is made on
//! the next token alone. Tokens are pulled lazily from the lexer, so a lexical error is reported
//! at its position together with the tokens the parser would have accepted there.
//!
//! ```text
//! command      := visual_lines | insert | delete_char | delete_lines
//!               | goto_line | find | replace
//! visual_lines := VISUAL LINES INT TO INT
//! insert       := INSERT (STRING | BLOCK_STRING) [AT LINE INT]
//! delete_char  := DELETE
//! delete_lines := DELETE LINES INT TO INT
//! goto_line    := GOTO LINE INT
//! find         := FIND STRING
//! replace      := REPLACE STRING WITH STRING
//! ```

use crate::error::{Found, SyntaxError};
use crate::grammar::{Span, Token, TokenKind};
use logos::{Logos, SpannedIter};
use std::iter::Peekable;

/// An integer literal, still in its written form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntNode {
    /// Decimal digits.
    pub digits: String,
    /// Location in the command text.
    pub span: Span,
}

/// `INT TO INT`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRangeNode {
    /// Range start.
    pub start: IntNode,
    /// Range end.
    pub end: IntNode,
    /// From the start number to the end number.
    pub span: Span,
}

/// Literal flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    /// `"..."`, escapes pending.
    Quoted,
    /// `"""..."""`, verbatim.
    Block,
}

/// A string literal without its quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringNode {
    /// Literal flavour.
    pub kind: StringKind,
    /// Interior text exactly as written.
    pub raw: String,
    /// Location in the command text, quotes included.
    pub span: Span,
}

/// `INSERT literal [AT LINE INT]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertNode {
    /// Text to insert.
    pub text: StringNode,
    /// Target line, when `AT LINE` is present.
    pub at_line: Option<IntNode>,
}

/// Concrete parse tree, one variant per production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTree {
    /// `VISUAL LINES a TO b`
    VisualLines(LineRangeNode),
    /// `INSERT ...`
    Insert(InsertNode),
    /// Bare `DELETE`.
    DeleteChar {
        /// Location of the keyword.
        span: Span,
    },
    /// `DELETE LINES a TO b`
    DeleteLines(LineRangeNode),
    /// `GOTO LINE n`
    GotoLine(IntNode),
    /// `FIND "pattern"`
    Find(StringNode),
    /// `REPLACE "old" WITH "new"`
    Replace {
        /// Text to replace.
        old: StringNode,
        /// Replacement.
        new: StringNode,
    },
}

/// Parse one complete command.
pub fn parse(source: &str) -> Result<ParseTree, SyntaxError> {
    let mut parser = Parser {
        source,
        tokens: Token::lexer(source).spanned().peekable(),
    };
    let tree = parser.command()?;
    parser.finish(&[])?;
    Ok(tree)
}

struct Parser<'s> {
    source: &'s str,
    tokens: Peekable<SpannedIter<'s, Token>>,
}

impl Parser<'_> {
    fn command(&mut self) -> Result<ParseTree, SyntaxError> {
        match self.peek_kind() {
            Some(TokenKind::Visual) => self.visual_lines(),
            Some(TokenKind::Insert) => self.insert(),
            Some(TokenKind::Delete) => self.delete(),
            Some(TokenKind::Goto) => self.goto_line(),
            Some(TokenKind::Find) => self.find(),
            Some(TokenKind::Replace) => self.replace(),
            _ => Err(self.error(&TokenKind::COMMAND_STARTS)),
        }
    }

    fn visual_lines(&mut self) -> Result<ParseTree, SyntaxError> {
        self.expect(TokenKind::Visual)?;
        self.expect(TokenKind::Lines)?;
        Ok(ParseTree::VisualLines(self.line_range()?))
    }

    fn insert(&mut self) -> Result<ParseTree, SyntaxError> {
        self.expect(TokenKind::Insert)?;
        let text = self.literal(true)?;
        let at_line = if self.at(TokenKind::At) {
            self.expect(TokenKind::At)?;
            self.expect(TokenKind::Line)?;
            Some(self.int()?)
        } else {
            self.finish(&[TokenKind::At])?;
            None
        };
        Ok(ParseTree::Insert(InsertNode { text, at_line }))
    }

    fn delete(&mut self) -> Result<ParseTree, SyntaxError> {
        let keyword = self.expect(TokenKind::Delete)?;
        if self.at(TokenKind::Lines) {
            self.expect(TokenKind::Lines)?;
            Ok(ParseTree::DeleteLines(self.line_range()?))
        } else {
            self.finish(&[TokenKind::Lines])?;
            Ok(ParseTree::DeleteChar { span: keyword })
        }
    }

    fn goto_line(&mut self) -> Result<ParseTree, SyntaxError> {
        self.expect(TokenKind::Goto)?;
        self.expect(TokenKind::Line)?;
        Ok(ParseTree::GotoLine(self.int()?))
    }

    fn find(&mut self) -> Result<ParseTree, SyntaxError> {
        self.expect(TokenKind::Find)?;
        Ok(ParseTree::Find(self.literal(false)?))
    }

    fn replace(&mut self) -> Result<ParseTree, SyntaxError> {
        self.expect(TokenKind::Replace)?;
        let old = self.literal(false)?;
        self.expect(TokenKind::With)?;
        let new = self.literal(false)?;
        Ok(ParseTree::Replace { old, new })
    }

    fn line_range(&mut self) -> Result<LineRangeNode, SyntaxError> {
        let start = self.int()?;
        self.expect(TokenKind::To)?;
        let end = self.int()?;
        let span = start.span.start..end.span.end;
        Ok(LineRangeNode { start, end, span })
    }

    fn int(&mut self) -> Result<IntNode, SyntaxError> {
        match self
            .tokens
            .next_if(|(token, _)| matches!(token, Ok(Token::Int(_))))
        {
            Some((Ok(Token::Int(digits)), span)) => Ok(IntNode { digits, span }),
            _ => Err(self.error(&[TokenKind::Int])),
        }
    }

    fn literal(&mut self, allow_block: bool) -> Result<StringNode, SyntaxError> {
        let next = self.tokens.next_if(|(token, _)| match token {
            Ok(Token::Str(_)) => true,
            Ok(Token::BlockStr(_)) => allow_block,
            _ => false,
        });
        match next {
            Some((Ok(Token::Str(raw)), span)) => Ok(StringNode {
                kind: StringKind::Quoted,
                raw,
                span,
            }),
            Some((Ok(Token::BlockStr(raw)), span)) => Ok(StringNode {
                kind: StringKind::Block,
                raw,
                span,
            }),
            _ if allow_block => Err(self.error(&[TokenKind::Str, TokenKind::BlockStr])),
            _ => Err(self.error(&[TokenKind::Str])),
        }
    }

    fn peek_kind(&mut self) -> Option<TokenKind> {
        match self.tokens.peek() {
            Some((Ok(token), _)) => Some(token.kind()),
            _ => None,
        }
    }

    fn at(&mut self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consume a keyword of the given kind, returning its span.
    fn expect(&mut self, kind: TokenKind) -> Result<Span, SyntaxError> {
        match self
            .tokens
            .next_if(|(token, _)| matches!(token, Ok(t) if t.kind() == kind))
        {
            Some((_, span)) => Ok(span),
            None => Err(self.error(&[kind])),
        }
    }

    /// Require end of input; `alternatives` are the other tokens valid here.
    fn finish(&mut self, alternatives: &[TokenKind]) -> Result<(), SyntaxError> {
        if self.tokens.peek().is_none() {
            return Ok(());
        }
        let mut expected = alternatives.to_vec();
        expected.push(TokenKind::End);
        Err(self.error(&expected))
    }

    fn error(&mut self, expected: &[TokenKind]) -> SyntaxError {
        let (offset, found) = match self.tokens.peek() {
            None => (self.source.len(), Found::Token(TokenKind::End)),
            Some((Ok(Token::Word(word)), span)) => (span.start, Found::Word(word.clone())),
            Some((Ok(token), span)) => (span.start, Found::Token(token.kind())),
            Some((Err(err), span)) => (span.start, Found::Invalid(err.clone())),
        };
        SyntaxError::new(self.source, offset, found, expected)
    }
}
