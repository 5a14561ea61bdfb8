// src/exec/command.rs

//! The `execute` wrapper: spawn, consume output, report failure.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{CistepError, Result};
use crate::failures::FailureSink;
use crate::status::StatusLogger;

use super::lookup;
use super::output::{self, OutputMode};

/// When set (non-empty) in the environment, every execution streams its
/// output live regardless of the mode the caller picked. Useful for
/// debugging a CI job whose steps normally run suppressed.
pub const ALWAYS_STREAM_ENV: &str = "CISTEP_ALWAYS_STREAM";

/// Per-execution configuration.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Extra variables merged over the inherited environment.
    pub env: Vec<(String, String)>,
    /// Working directory for the child; inherited when `None`.
    pub cwd: Option<PathBuf>,
    /// Ask the failure sink to abort the whole run on nonzero exit.
    pub instant_fail: bool,
    /// Print the failure banner on nonzero exit but skip the failure
    /// sink entirely.
    pub allow_failure: bool,
}

/// Run `argv` to completion and return its exit status.
///
/// The command runs with the current environment plus
/// `options.env`, with fresh pipes for stdout/stderr that `mode`
/// consumes until the process exits. A nonzero status is logged as a
/// failure banner and reported to `failures` (unless
/// `options.allow_failure`), but still returned normally; escalation
/// is the sink's business, not this function's.
///
/// Errors:
/// - [`CistepError::Spawn`] when the executable cannot be found or
///   launched; carries the attempted command line.
/// - I/O errors from the pipes propagate and abort the invocation; the
///   pipes themselves are owned by the consuming code and closed on
///   every path.
pub async fn execute(
    failures: &dyn FailureSink,
    mode: OutputMode,
    logger: &StatusLogger,
    argv: &[String],
    options: ExecOptions,
) -> Result<i32> {
    let program = argv
        .first()
        .context("execute called with an empty command line")?;
    let joined = argv.join(" ");

    if lookup::which(program).is_none() {
        return Err(CistepError::Spawn {
            command: joined,
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{program} not found in PATH"),
            ),
        });
    }

    let mode = resolve_mode(mode);
    info!(cmd = %joined, ?mode, "starting step process");

    let mut cmd = Command::new(program);
    cmd.args(&argv[1..])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    for (key, value) in &options.env {
        cmd.env(key, value);
    }
    if let Some(dir) = &options.cwd {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|source| CistepError::Spawn {
        command: joined.clone(),
        source,
    })?;

    let stdout = child
        .stdout
        .take()
        .context("child stdout pipe missing")?;
    let stderr = child
        .stderr
        .take()
        .context("child stderr pipe missing")?;

    let status = output::consume(mode, logger, &mut child, stdout, stderr).await?;

    if status != 0 {
        warn!(cmd = %joined, status, "step process failed");
        logger.message(&format!("!!! Process {joined} failed with {status}\n"));

        if !options.allow_failure {
            failures.note_failure(options.instant_fail);
        }
    } else {
        debug!(cmd = %joined, "step process exited cleanly");
    }

    Ok(status)
}

/// Apply the [`ALWAYS_STREAM_ENV`] override.
fn resolve_mode(mode: OutputMode) -> OutputMode {
    let forced = std::env::var(ALWAYS_STREAM_ENV)
        .map(|value| !value.is_empty())
        .unwrap_or(false);

    if forced {
        OutputMode::Streaming
    } else {
        mode
    }
}
