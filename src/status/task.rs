// src/status/task.rs

//! Named, nestable units of work.

use super::logger::{IndentGuard, StatusLogger};

/// Announces a named unit of work and indents everything inside it.
///
/// A top-level task is announced as `==> {description}`; nested tasks
/// as `... {description}`, indented to their level. Dropping the scope
/// unwinds the indentation (emitting the separating newline when the
/// outermost level is reached) and then decrements the task nest level,
/// so pairing holds even when the work inside fails early.
///
/// ```no_run
/// use cistep::status::StatusLogger;
///
/// let logger = StatusLogger::stderr();
/// let _task = logger.task("Installing toolchain");
/// logger.message("\nfetching packages");
/// ```
pub struct TaskScope {
    logger: StatusLogger,
    guard: Option<IndentGuard>,
}

impl TaskScope {
    pub fn new(logger: &StatusLogger, description: &str) -> Self {
        let marker = if logger.task_level() == 0 { "==>" } else { "..." };
        logger.message(&format!("\n{marker} {description}"));

        logger.push_task_level();
        let guard = logger.nested();

        Self {
            logger: logger.clone(),
            guard: Some(guard),
        }
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        // Leave the logger scope first; the task level must still be
        // nonzero while the indent unwinds.
        self.guard.take();
        self.logger.pop_task_level();
    }
}

impl StatusLogger {
    /// Announce `description` and enter a task scope.
    pub fn task(&self, description: &str) -> TaskScope {
        TaskScope::new(self, description)
    }
}
