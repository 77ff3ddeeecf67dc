use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "stvim")]
#[command(version)]
#[command(about = "Run editing commands (GOTO LINE 3, REPLACE \"a\" WITH \"b\", ...) against a file.")]
#[command(
    after_help = "Commands are read from -c, then --script, then stdin when neither is given.\n\
                  Logging: set STVIM_LOG=debug (default: warn) to trace each command on stderr."
)]
pub(crate) struct Cli {
    /// File to edit. Without it the buffer starts empty.
    pub(crate) file: Option<PathBuf>,

    /// A single command; may be repeated.
    #[arg(short, long = "command", value_name = "COMMAND")]
    pub(crate) commands: Vec<String>,

    /// Script file with one command per line (block strings may span lines).
    #[arg(short, long)]
    pub(crate) script: Option<PathBuf>,

    /// Run the built-in demo session against a sample buffer.
    #[arg(long, conflicts_with_all = ["file", "commands", "script", "write"])]
    pub(crate) demo: bool,

    /// Keep running after a failing command.
    #[arg(long)]
    pub(crate) keep_going: bool,

    /// Save the buffer back to FILE when done.
    #[arg(short, long, requires = "file")]
    pub(crate) write: bool,

    /// Print one JSON object per command instead of status lines.
    #[arg(long)]
    pub(crate) json: bool,

    /// Do not restart FIND from the top of the buffer.
    #[arg(long)]
    pub(crate) no_wrap: bool,

    /// Case-insensitive FIND and REPLACE.
    #[arg(short, long)]
    pub(crate) ignore_case: bool,

    /// FIND and REPLACE only match whole words.
    #[arg(long)]
    pub(crate) whole_word: bool,

    /// Print the buffer with line numbers when done.
    #[arg(long)]
    pub(crate) show: bool,

    /// List the available commands and exit.
    #[arg(long)]
    pub(crate) list_commands: bool,
}
