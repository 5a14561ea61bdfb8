use std::io;
use std::sync::{Arc, Mutex};

use cistep::status::LogSink;

/// In-memory `LogSink` whose contents tests can read back.
///
/// Cloning shares the buffer: hand one clone to the logger and keep
/// another for assertions.
#[derive(Clone, Default)]
pub struct CaptureSink {
    buffer: Arc<Mutex<String>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.buffer.lock().unwrap().clone()
    }

    /// Number of heartbeat dots written so far.
    pub fn dot_count(&self) -> usize {
        self.contents().matches('.').count()
    }
}

impl LogSink for CaptureSink {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.buffer.lock().unwrap().push_str(text);
        Ok(())
    }
}
