#![warn(missing_docs)]
//! stvim core: a small command language for line-oriented text buffers.
//!
//! # Overview
//!
//! Commands such as `GOTO LINE 3` or `REPLACE "bug" WITH "feature"` are lexed, parsed into a
//! [`ParseTree`], turned into a validated [`Command`] and executed against anything that
//! implements [`Buffer`]. The crate is headless: it never owns an editor, it drives one.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ grammar      │ → │ parser       │ → │ transform    │ → │ dispatch     │
//! │ logos tokens │   │ ParseTree    │   │ Command      │   │ dyn Buffer   │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//!   SyntaxError        SyntaxError        SemanticError      ExecutionError
//! ```
//!
//! [`Engine`] wraps all four stages and reports failures as one [`Error`] that knows which
//! stage failed and which command text caused it.
//!
//! # Quick Start
//!
//! ```rust
//! use stvim_core::{Buffer, Engine, Outcome, Position, RopeBuffer};
//!
//! let engine = Engine::default();
//! let mut buffer = RopeBuffer::from_lines(["first", "second", "third"]);
//!
//! engine.execute("GOTO LINE 2", &mut buffer).unwrap();
//! engine.execute(r#"INSERT "inserted""#, &mut buffer).unwrap();
//! assert_eq!(buffer.lines(), vec!["first", "second", "inserted", "third"]);
//!
//! let found = engine.execute(r#"FIND "third""#, &mut buffer).unwrap();
//! assert_eq!(found.outcome, Outcome::Found {
//!     position: Position::new(4, 0),
//!     wrapped: false,
//! });
//! assert_eq!(buffer.cursor().unwrap(), Position::new(4, 0));
//! ```
//!
//! # Module Description
//!
//! - [`grammar`] - token vocabulary and the command catalogue
//! - [`parser`] - LL(1) recursive-descent parser
//! - [`transform`] - parse tree to command, with domain checks
//! - [`command`] - commands, outcomes and execution results
//! - [`buffer`] - the buffer capability the dispatcher drives
//! - [`rope_buffer`] - in-memory buffer backed by `ropey`
//! - [`search`] - literal matching with case and whole-word options
//! - [`line_ending`] - CRLF and final-newline bookkeeping for files
//! - [`dispatch`] - command execution against a buffer
//! - [`engine`] - the whole pipeline behind one call
//! - [`error`] - error taxonomy

pub mod buffer;
pub mod command;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod line_ending;
pub mod parser;
pub mod rope_buffer;
pub mod search;
pub mod transform;

pub use buffer::{Buffer, BufferError};
pub use command::{Command, Deletion, ExecutionResult, Outcome, Position};
pub use dispatch::{DispatchConfig, Dispatcher};
pub use engine::{BatchPolicy, Engine};
pub use error::{Error, ExecutionError, Found, SemanticError, Stage, SyntaxError};
pub use grammar::{COMMAND_SYNTAX, CommandSyntax, TokenKind};
pub use line_ending::{LineEnding, TextFormat};
pub use parser::{ParseTree, parse};
pub use rope_buffer::RopeBuffer;
pub use search::SearchOptions;
pub use transform::transform;
