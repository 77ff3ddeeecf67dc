//! Parse tree to [`Command`].
//!
//! Pure and side-effect free: the transformer sees no buffer, so it checks only what can be
//! decided from the command text itself (positive line numbers, ordered ranges, non-empty
//! patterns). Bounds against the buffer are the dispatcher's concern.

use crate::command::Command;
use crate::error::SemanticError;
use crate::parser::{IntNode, LineRangeNode, ParseTree, StringKind, StringNode};

/// Turn a parse tree into a validated command.
pub fn transform(tree: ParseTree) -> Result<Command, SemanticError> {
    match tree {
        ParseTree::VisualLines(range) => {
            let (start, end) = line_range(&range)?;
            Ok(Command::VisualLines { start, end })
        }
        ParseTree::Insert(node) => {
            let at_line = node.at_line.as_ref().map(line_number).transpose()?;
            Ok(Command::Insert {
                text: string_value(&node.text),
                at_line,
            })
        }
        ParseTree::DeleteChar { .. } => Ok(Command::DeleteChar),
        ParseTree::DeleteLines(range) => {
            let (start, end) = line_range(&range)?;
            Ok(Command::DeleteLines { start, end })
        }
        ParseTree::GotoLine(line) => Ok(Command::GotoLine {
            line: line_number(&line)?,
        }),
        ParseTree::Find(pattern) => Ok(Command::Find {
            pattern: search_pattern(&pattern)?,
        }),
        ParseTree::Replace { old, new } => Ok(Command::Replace {
            old: search_pattern(&old)?,
            new: string_value(&new),
        }),
    }
}

fn line_number(node: &IntNode) -> Result<usize, SemanticError> {
    // The lexer only produces digits, so a failed parse is an overflow.
    let value: usize = node
        .digits
        .parse()
        .map_err(|_| SemanticError::LineNumberTooLarge {
            digits: node.digits.clone(),
            span: node.span.clone(),
        })?;
    if value == 0 {
        return Err(SemanticError::ZeroLineNumber {
            span: node.span.clone(),
        });
    }
    Ok(value)
}

fn line_range(node: &LineRangeNode) -> Result<(usize, usize), SemanticError> {
    let start = line_number(&node.start)?;
    let end = line_number(&node.end)?;
    if start > end {
        return Err(SemanticError::InvertedRange {
            start,
            end,
            span: node.span.clone(),
        });
    }
    Ok((start, end))
}

fn search_pattern(node: &StringNode) -> Result<String, SemanticError> {
    let pattern = string_value(node);
    if pattern.is_empty() {
        return Err(SemanticError::EmptyPattern {
            span: node.span.clone(),
        });
    }
    Ok(pattern)
}

fn string_value(node: &StringNode) -> String {
    match node.kind {
        StringKind::Quoted => unescape(&node.raw),
        StringKind::Block => node.raw.clone(),
    }
}

/// Process `\"` and `\\`; any other backslash sequence is kept as written.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(next @ ('"' | '\\')) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}
