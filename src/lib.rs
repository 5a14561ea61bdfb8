// src/lib.rs

pub mod cli;
pub mod errors;
pub mod exec;
pub mod failures;
pub mod logging;
pub mod status;

use std::time::Duration;

use tracing::debug;

use crate::cli::{CliArgs, OutputArg};
use crate::errors::{CistepError, Result};
use crate::exec::{execute, ExecOptions, OutputMode};
use crate::failures::FailureTracker;
use crate::status::StatusLogger;

/// High-level entry point used by `main.rs`.
///
/// Runs the single step described by `args` and returns its exit
/// status, which the binary uses as its own.
pub async fn run(args: CliArgs) -> Result<i32> {
    let logger = StatusLogger::stderr();
    let failures = FailureTracker::new();

    let mode = output_mode(&args);
    let options = ExecOptions {
        env: parse_env_pairs(&args.env)?,
        cwd: args.cwd.clone(),
        instant_fail: args.instant_fail,
        allow_failure: args.allow_failure,
    };

    let status = match args.task.as_deref() {
        Some(description) => {
            let _task = logger.task(description);
            execute(&failures, mode, &logger, &args.command, options).await?
        }
        None => execute(&failures, mode, &logger, &args.command, options).await?,
    };

    debug!(
        status,
        failures = failures.failure_count(),
        abort = failures.abort_requested(),
        "step finished"
    );

    Ok(status)
}

fn output_mode(args: &CliArgs) -> OutputMode {
    match args.output {
        OutputArg::OnFail => OutputMode::Suppressed,
        OutputArg::Stream => OutputMode::Streaming,
        OutputArg::Dots => OutputMode::Heartbeat {
            dot_timeout: Duration::from_secs(args.dot_timeout),
        },
    }
}

/// Parse repeated `KEY=VALUE` flags into environment pairs.
fn parse_env_pairs(pairs: &[String]) -> Result<Vec<(String, String)>> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .filter(|(key, _)| !key.is_empty())
                .ok_or_else(|| CistepError::InvalidEnvVar(pair.clone()))
        })
        .collect()
}
