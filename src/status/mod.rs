// src/status/mod.rs

//! Nested status output rendered to stderr.
//!
//! This is the user-facing surface of the crate, distinct from the
//! `tracing`-based diagnostics in [`crate::logging`]:
//!
//! - [`logger`] owns [`StatusLogger`], a cloneable handle over shared
//!   indentation state, plus the [`LogSink`] abstraction that lets tests
//!   capture output in memory.
//! - [`task`] provides [`TaskScope`], a named unit of work that announces
//!   itself with a `==>` / `...` header and indents everything inside it.

pub mod logger;
pub mod task;

pub use logger::{IndentGuard, LogSink, StatusLogger, StderrSink};
pub use task::TaskScope;
