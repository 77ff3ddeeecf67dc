//! Parse → transform → dispatch in one call.

use crate::buffer::Buffer;
use crate::command::{Command, ExecutionResult};
use crate::dispatch::{DispatchConfig, Dispatcher};
use crate::error::Error;
use crate::parser::{self, ParseTree};
use crate::transform;
use tracing::debug;

/// What [`Engine::execute_batch`] does after a failing command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Stop; the failure is the last entry of the results.
    #[default]
    StopOnError,
    /// Record the failure and run the remaining commands.
    Continue,
}

/// Front door of the command language.
///
/// ```rust
/// use stvim_core::{Engine, RopeBuffer};
///
/// let engine = Engine::default();
/// let mut buffer = RopeBuffer::from_lines(["fix the bug", "another bug"]);
///
/// let result = engine.execute(r#"REPLACE "bug" WITH "feature""#, &mut buffer).unwrap();
/// assert_eq!(result.to_string(), r#"Replaced 2 occurrences of "bug" with "feature""#);
/// assert_eq!(buffer.lines(), vec!["fix the feature", "another feature"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    dispatcher: Dispatcher,
}

impl Engine {
    /// Create an engine whose dispatcher uses `config`.
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(config),
        }
    }

    /// The dispatcher used by [`Engine::execute`].
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Parse `input` without transforming it.
    pub fn parse_tree(&self, input: &str) -> Result<ParseTree, Error> {
        parser::parse(input).map_err(|error| Error::Syntax {
            input: input.to_owned(),
            error,
        })
    }

    /// Parse and transform `input` without touching any buffer.
    pub fn validate(&self, input: &str) -> Result<Command, Error> {
        let tree = self.parse_tree(input)?;
        let command = transform::transform(tree).map_err(|error| Error::Semantic {
            input: input.to_owned(),
            error,
        })?;
        debug!(command = command.name(), "validated");
        Ok(command)
    }

    /// Parse, transform and dispatch one command.
    pub fn execute<B>(&self, input: &str, buffer: &mut B) -> Result<ExecutionResult, Error>
    where
        B: Buffer + ?Sized,
    {
        let command = self.validate(input)?;
        self.dispatcher
            .dispatch(&command, buffer)
            .map_err(|error| Error::dispatch(input, error))
    }

    /// Run `inputs` in order, one result per attempted command.
    pub fn execute_batch<B, I, S>(
        &self,
        inputs: I,
        buffer: &mut B,
        policy: BatchPolicy,
    ) -> Vec<Result<ExecutionResult, Error>>
    where
        B: Buffer + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut results = Vec::new();
        for input in inputs {
            let result = self.execute(input.as_ref(), buffer);
            let failed = result.is_err();
            results.push(result);
            if failed && policy == BatchPolicy::StopOnError {
                break;
            }
        }
        results
    }
}
