// src/status/logger.rs

use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

/// Destination for rendered status text.
///
/// Production uses [`StderrSink`]; tests plug in an in-memory sink so
/// assertions can read back exactly what was written.
pub trait LogSink: Send {
    fn write_str(&mut self, text: &str) -> io::Result<()>;
}

/// Sink that writes to the process's stderr, flushing every write.
///
/// When stderr is not a terminal (e.g. a CI log file), bare carriage
/// returns are dropped so progress-style `\r` rewrites don't litter the
/// captured log.
pub struct StderrSink {
    strip_carriage_returns: bool,
}

impl StderrSink {
    pub fn new() -> Self {
        Self {
            strip_carriage_returns: !io::stderr().is_terminal(),
        }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for StderrSink {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        if self.strip_carriage_returns {
            stderr.write_all(text.replace('\r', "").as_bytes())?;
        } else {
            stderr.write_all(text.as_bytes())?;
        }
        stderr.flush()
    }
}

struct LoggerState {
    /// Current indent depth; each level is four spaces.
    depth: usize,
    /// Whether anything was written while `depth > 0`. Cleared when the
    /// outermost scope exits and the separating newline is emitted.
    printed_nested: bool,
    /// Task nest level. Tracked separately from `depth` (headers are
    /// printed before the scope is entered) but kept in lockstep by
    /// [`super::TaskScope`].
    task_level: usize,
    sink: Box<dyn LogSink>,
}

/// Handle to the shared status-rendering state.
///
/// Clones observe the same counters and sink; reader tasks spawned per
/// command execution each hold a clone. The mutex serializes writes so
/// each `message` call lands in the sink as one unit, but it does not
/// make overlapping [`super::TaskScope`]s from independent logical
/// flows meaningful: scope nesting must stay call-stack-shaped.
#[derive(Clone)]
pub struct StatusLogger {
    state: Arc<Mutex<LoggerState>>,
}

impl fmt::Debug for StatusLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("StatusLogger")
            .field("depth", &state.depth)
            .field("task_level", &state.task_level)
            .finish_non_exhaustive()
    }
}

impl StatusLogger {
    /// Logger writing to the process's stderr.
    pub fn stderr() -> Self {
        Self::with_sink(StderrSink::new())
    }

    /// Logger writing to a custom sink.
    pub fn with_sink<S: LogSink + 'static>(sink: S) -> Self {
        Self {
            state: Arc::new(Mutex::new(LoggerState {
                depth: 0,
                printed_nested: false,
                task_level: 0,
                sink: Box::new(sink),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Write `text` at the current indent level.
    ///
    /// Every `\r` and `\n` in `text` re-emits the indent string
    /// immediately after it, so multi-line output stays aligned. No
    /// trailing newline is added; callers control terminators.
    pub fn message(&self, text: &str) {
        let mut state = self.lock();
        if state.depth > 0 {
            state.printed_nested = true;
        }

        let indent = "    ".repeat(state.depth);
        let formatted = text
            .replace('\r', &format!("\r{indent}"))
            .replace('\n', &format!("\n{indent}"));

        if let Err(err) = state.sink.write_str(&formatted) {
            debug!(error = %err, "status sink write failed");
        }
    }

    /// Write a single `.` with no indent processing. Used for
    /// heartbeat ticks; does not count as nested output.
    pub fn dot(&self) {
        let mut state = self.lock();
        if let Err(err) = state.sink.write_str(".") {
            debug!(error = %err, "status sink write failed");
        }
    }

    /// Enter a nested scope, indenting subsequent messages one level.
    ///
    /// The returned guard decrements the depth when dropped, on every
    /// path. When the depth returns to zero and anything was written
    /// while nested, one trailing newline separates the burst from
    /// whatever follows.
    pub fn nested(&self) -> IndentGuard {
        self.lock().depth += 1;
        IndentGuard {
            logger: self.clone(),
        }
    }

    pub(crate) fn task_level(&self) -> usize {
        self.lock().task_level
    }

    pub(crate) fn push_task_level(&self) {
        self.lock().task_level += 1;
    }

    pub(crate) fn pop_task_level(&self) {
        let mut state = self.lock();
        state.task_level = state.task_level.saturating_sub(1);
    }
}

/// RAII guard for one level of indentation. See [`StatusLogger::nested`].
pub struct IndentGuard {
    logger: StatusLogger,
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        let mut state = self.logger.lock();
        state.depth = state.depth.saturating_sub(1);

        if state.depth == 0 && state.printed_nested {
            if let Err(err) = state.sink.write_str("\n") {
                debug!(error = %err, "status sink write failed");
            }
            state.printed_nested = false;
        }
    }
}
