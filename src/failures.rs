// src/failures.rs

//! Failure-reporting collaborator.
//!
//! [`crate::exec::execute`] reports nonzero exit statuses here; whether
//! that aborts the whole run or is recorded and carried on is this
//! side's decision, not the executor's.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tracing::warn;

/// Receives failure notifications from command execution.
///
/// Production code uses [`FailureTracker`]; tests can provide their own
/// implementation that records calls.
pub trait FailureSink: Send + Sync {
    /// Note that a step exited nonzero. `instant_fail` asks for the
    /// whole run to be aborted rather than recorded.
    fn note_failure(&self, instant_fail: bool);
}

/// Default failure bookkeeping for a run of steps.
///
/// Counts failures; the count doubles as the run's exit code, so a
/// clean run reports zero. An `instant_fail` notification additionally
/// latches the abort flag for the driver to act on.
#[derive(Debug, Default)]
pub struct FailureTracker {
    failures: AtomicUsize,
    abort_requested: AtomicBool,
}

impl FailureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    /// Exit code for the run so far: the number of noted failures.
    pub fn return_code(&self) -> i32 {
        i32::try_from(self.failure_count()).unwrap_or(i32::MAX)
    }

    pub fn abort_requested(&self) -> bool {
        self.abort_requested.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.failures.store(0, Ordering::SeqCst);
        self.abort_requested.store(false, Ordering::SeqCst);
    }
}

impl FailureSink for FailureTracker {
    fn note_failure(&self, instant_fail: bool) {
        let total = self.failures.fetch_add(1, Ordering::SeqCst) + 1;
        warn!(total, instant_fail, "step failure noted");

        if instant_fail {
            self.abort_requested.store(true, Ordering::SeqCst);
        }
    }
}
