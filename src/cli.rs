// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `cistep`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cistep",
    version,
    about = "Run a CI step with nested status logging and selectable output handling.",
    long_about = None
)]
pub struct CliArgs {
    /// How to surface the command's output while it runs.
    #[arg(long, value_enum, value_name = "MODE", default_value_t = OutputArg::OnFail)]
    pub output: OutputArg,

    /// Seconds between heartbeat dots (only used with `--output dots`).
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub dot_timeout: u64,

    /// Announce the step as a named task before running it.
    #[arg(long, value_name = "DESC")]
    pub task: Option<String>,

    /// Extra KEY=VALUE environment variables for the command.
    #[arg(long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Working directory for the command.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Abort the whole run immediately if the command fails.
    #[arg(long)]
    pub instant_fail: bool,

    /// Print the failure banner on a nonzero exit, but don't count it
    /// as a failure.
    #[arg(long)]
    pub allow_failure: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CISTEP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Command to run, after `--`.
    #[arg(required = true, last = true, value_name = "CMD")]
    pub command: Vec<String>,
}

/// Output handling as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Capture output; show it only if the command fails.
    OnFail,
    /// Stream output live as the command produces it.
    Stream,
    /// Suppress output, printing a heartbeat dot while the command runs.
    Dots,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
