//! `stvim`: run editing commands against a file.
//!
//! # Usage
//!
//! ```bash
//! stvim notes.txt -c 'GOTO LINE 3' -c 'INSERT "new third line"' --write
//! stvim notes.txt --script edits.stvim --keep-going --show
//! echo 'REPLACE "bug" WITH "feature"' | stvim src.txt --json
//! stvim --demo
//! ```
//!
//! Logging: set `STVIM_LOG=debug` (default `warn`) to see each dispatched command on stderr.

mod cli;
mod demo;
mod script;

use std::io::Read;
use std::process::ExitCode;
use std::{fs, io};

use anyhow::{Context, bail};
use clap::Parser;
use serde_json::json;
use stvim_core::{
    BatchPolicy, Buffer, COMMAND_SYNTAX, DispatchConfig, Engine, Error, ExecutionResult,
    RopeBuffer, SearchOptions,
};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::demo::{DEMO_COMMANDS, DEMO_LINES};
use crate::script::split_commands;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("STVIM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    if cli.list_commands {
        print_command_list();
        return Ok(ExitCode::SUCCESS);
    }

    let engine = Engine::new(DispatchConfig {
        wrap_search: !cli.no_wrap,
    });
    let search_options = SearchOptions {
        case_sensitive: !cli.ignore_case,
        whole_word: cli.whole_word,
    };

    if cli.demo {
        let buffer = RopeBuffer::from_lines(DEMO_LINES).with_search_options(search_options);
        return Ok(run_demo(&engine, buffer, cli.json));
    }

    let mut buffer = match &cli.file {
        Some(path) if path.exists() => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            RopeBuffer::from_text(&text)
        }
        _ => RopeBuffer::new(),
    }
    .with_search_options(search_options);

    let commands = collect_commands(&cli)?;
    tracing::debug!(count = commands.len(), "running commands");

    let policy = if cli.keep_going {
        BatchPolicy::Continue
    } else {
        BatchPolicy::StopOnError
    };
    let results = engine.execute_batch(&commands, &mut buffer, policy);

    let mut failed = false;
    for (input, result) in commands.iter().zip(&results) {
        failed |= result.is_err();
        report(input, result, cli.json)?;
    }
    if results.len() < commands.len() {
        eprintln!(
            "stopped after the first failure; {} command(s) not run",
            commands.len() - results.len()
        );
    }

    if cli.show {
        print_buffer(&buffer);
    }

    if cli.write {
        let Some(path) = &cli.file else {
            bail!("--write needs a FILE");
        };
        if failed && !cli.keep_going {
            bail!("not writing {} because a command failed", path.display());
        }
        fs::write(path, buffer.to_file_text())
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn collect_commands(cli: &Cli) -> anyhow::Result<Vec<String>> {
    let mut commands = cli.commands.clone();
    if let Some(path) = &cli.script {
        let script = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        commands.extend(split_commands(&script));
    }
    if commands.is_empty() {
        let mut script = String::new();
        io::stdin()
            .read_to_string(&mut script)
            .context("failed to read commands from stdin")?;
        commands = split_commands(&script);
    }
    Ok(commands)
}

fn run_demo(engine: &Engine, mut buffer: RopeBuffer, json: bool) -> ExitCode {
    println!("Initial buffer:");
    print_buffer(&buffer);

    for input in DEMO_COMMANDS {
        println!();
        println!("> {input}");
        let result = engine.execute(input, &mut buffer);
        let failed = result.is_err();
        if let Err(err) = report(input, &result, json) {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
        if failed {
            return ExitCode::FAILURE;
        }
        print_buffer(&buffer);
    }
    ExitCode::SUCCESS
}

fn report(input: &str, result: &Result<ExecutionResult, Error>, json: bool) -> anyhow::Result<()> {
    if json {
        let value = match result {
            Ok(result) => json!({ "input": input, "ok": result }),
            Err(err) => json!({
                "input": input,
                "error": { "stage": err.stage(), "message": err.to_string() }
            }),
        };
        println!("{}", serde_json::to_string(&value)?);
        return Ok(());
    }

    match result {
        Ok(result) => println!("{result}"),
        Err(err) => eprintln!("{} error: {err}", err.stage()),
    }
    Ok(())
}

fn print_command_list() {
    let width = COMMAND_SYNTAX
        .iter()
        .map(|syntax| syntax.keyword.len() + syntax.arguments.len() + 1)
        .max()
        .unwrap_or(0);
    for syntax in COMMAND_SYNTAX {
        let usage = format!("{} {}", syntax.keyword, syntax.arguments);
        println!("  {:<width$}  {}", usage.trim_end(), syntax.description);
    }
}

fn print_buffer(buffer: &RopeBuffer) {
    let cursor_line = buffer.cursor().map(|position| position.line).unwrap_or(0);
    let selection = buffer.selection();
    let width = buffer.len_lines().to_string().len();

    for (idx, line) in buffer.lines().iter().enumerate() {
        let number = idx + 1;
        let marker = if number == cursor_line {
            '>'
        } else if selection.is_some_and(|(start, end)| (start..=end).contains(&number)) {
            '*'
        } else {
            ' '
        };
        println!("{marker}{number:>width$} | {line}");
    }
}
