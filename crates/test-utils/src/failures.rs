use std::sync::{Arc, Mutex};

use cistep::failures::FailureSink;

/// A fake `FailureSink` that records every `note_failure` call and the
/// `instant_fail` flag it carried.
#[derive(Clone, Default)]
pub struct RecordingFailures {
    calls: Arc<Mutex<Vec<bool>>>,
}

impl RecordingFailures {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `instant_fail` flags, in call order.
    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl FailureSink for RecordingFailures {
    fn note_failure(&self, instant_fail: bool) {
        self.calls.lock().unwrap().push(instant_fail);
    }
}
