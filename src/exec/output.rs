// src/exec/output.rs

//! Output modes: policies for consuming a running command's streams.
//!
//! All three take the spawned child and its stdout/stderr pipes and
//! block until the process has finished, returning its exit status.
//! They differ only in what they do with output while waiting:
//!
//! - [`OutputMode::Suppressed`] captures both streams and shows them
//!   only if the command fails.
//! - [`OutputMode::Streaming`] forwards output live, byte by byte.
//! - [`OutputMode::Heartbeat`] suppresses output but prints a `.`
//!   every tick so long silent commands still show liveness.
//!
//! Reader tasks are joined before returning, so no reader outlives its
//! invocation and the pipes are closed (by drop) on every path.

use std::process::ExitStatus;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdout};
use tokio::sync::oneshot;
use tokio::time;
use tracing::debug;

use crate::errors::Result;
use crate::status::StatusLogger;

/// Tick interval used by [`OutputMode::heartbeat`].
pub const DEFAULT_DOT_TIMEOUT: Duration = Duration::from_secs(10);

/// How a command's stdout/stderr are surfaced while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Capture output in memory; show it only if the command fails.
    Suppressed,
    /// Forward output to the status logger as it is produced.
    Streaming,
    /// Like `Suppressed`, but emit a heartbeat dot every `dot_timeout`
    /// while the command runs.
    Heartbeat { dot_timeout: Duration },
}

impl OutputMode {
    /// Heartbeat mode with the default tick interval.
    pub fn heartbeat() -> Self {
        OutputMode::Heartbeat {
            dot_timeout: DEFAULT_DOT_TIMEOUT,
        }
    }
}

/// Consume the child's output per `mode` and return its exit status.
pub(crate) async fn consume(
    mode: OutputMode,
    logger: &StatusLogger,
    child: &mut Child,
    stdout: ChildStdout,
    stderr: ChildStderr,
) -> Result<i32> {
    match mode {
        OutputMode::Suppressed => suppressed(logger, child, stdout, stderr).await,
        OutputMode::Streaming => streaming(logger, child, stdout, stderr).await,
        OutputMode::Heartbeat { dot_timeout } => {
            heartbeat(logger, child, stdout, stderr, dot_timeout).await
        }
    }
}

/// Capture both streams fully, then show them only on failure.
async fn suppressed(
    logger: &StatusLogger,
    child: &mut Child,
    stdout: ChildStdout,
    stderr: ChildStderr,
) -> Result<i32> {
    let out_reader = tokio::spawn(drain(stdout));
    let err_reader = tokio::spawn(drain(stderr));

    // Readers run until end-of-stream; join them before waiting so no
    // output is discarded even if the child closes its pipes early.
    let captured_out = out_reader.await.map_err(anyhow::Error::from)??;
    let captured_err = err_reader.await.map_err(anyhow::Error::from)??;

    let status = child.wait().await?;
    let code = exit_code(status);

    if code != 0 {
        logger.message("\n");
        logger.message(&String::from_utf8_lossy(&captured_out));
        logger.message(&String::from_utf8_lossy(&captured_err));
    }

    Ok(code)
}

async fn drain<R>(reader: R) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(buf)
}

/// Forward both streams to the logger as output arrives.
///
/// Interleaving between stdout and stderr is whatever the OS delivers;
/// within each stream, byte order is preserved.
async fn streaming(
    logger: &StatusLogger,
    child: &mut Child,
    stdout: ChildStdout,
    stderr: ChildStderr,
) -> Result<i32> {
    let out_logger = logger.clone();
    let out_reader =
        tokio::spawn(async move { stream_to_logger(stdout, out_logger, true).await });

    let err_logger = logger.clone();
    let err_reader =
        tokio::spawn(async move { stream_to_logger(stderr, err_logger, false).await });

    // Join the readers even when the wait itself fails: the child is
    // gone either way, so both streams hit end-of-file and the readers
    // finish rather than outliving this call.
    let status = child.wait().await;

    out_reader.await.map_err(anyhow::Error::from)??;
    err_reader.await.map_err(anyhow::Error::from)??;

    Ok(exit_code(status?))
}

/// Read `reader` byte by byte, forwarding decoded text to the logger.
///
/// Bytes accumulate until they form valid UTF-8; an incomplete sequence
/// waits for more input. With `blank_line_before_first` set, the first
/// byte read triggers a leading blank line unless it is itself a
/// newline, so the command's first output line does not run into the
/// task header.
async fn stream_to_logger<R>(
    reader: R,
    logger: StatusLogger,
    blank_line_before_first: bool,
) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut pending: Vec<u8> = Vec::new();
    let mut read_first_byte = false;
    let mut byte = [0u8; 1];

    loop {
        let n = reader.read(&mut byte).await?;
        if n == 0 {
            // End-of-stream; flush whatever is left, lossily.
            if !pending.is_empty() {
                logger.message(&String::from_utf8_lossy(&pending));
            }
            return Ok(());
        }

        if !read_first_byte {
            read_first_byte = true;
            if blank_line_before_first && byte[0] != b'\n' {
                logger.message("\n");
            }
        }

        pending.push(byte[0]);
        match std::str::from_utf8(&pending) {
            Ok(text) => {
                logger.message(text);
                pending.clear();
            }
            // Incomplete multi-byte sequence: keep reading.
            Err(err) if err.error_len().is_none() => {}
            Err(_) => {
                logger.message(&String::from_utf8_lossy(&pending));
                pending.clear();
            }
        }
    }
}

/// Suppressed capture plus a ticking `.` while the command runs.
///
/// The ticker blocks up to `dot_timeout` on a oneshot done-channel:
/// a tick that times out emits one dot and loops; the done signal (sent
/// as soon as the wrapped mode returns, including on error) wakes it
/// immediately. The ticker is joined before returning, so no dot is
/// printed after the status has been captured.
async fn heartbeat(
    logger: &StatusLogger,
    child: &mut Child,
    stdout: ChildStdout,
    stderr: ChildStderr,
    dot_timeout: Duration,
) -> Result<i32> {
    let (done_tx, mut done_rx) = oneshot::channel::<()>();

    let ticker_logger = logger.clone();
    let ticker = tokio::spawn(async move {
        loop {
            match time::timeout(dot_timeout, &mut done_rx).await {
                // Done signal, or the sender side went away.
                Ok(_) => return,
                Err(_) => ticker_logger.dot(),
            }
        }
    });

    let result = suppressed(logger, child, stdout, stderr).await;

    if done_tx.send(()).is_err() {
        debug!("heartbeat ticker exited before done signal");
    }
    ticker.await.map_err(anyhow::Error::from)?;

    result
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
