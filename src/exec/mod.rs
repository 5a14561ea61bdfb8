// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs a single external command to completion with
//! `tokio::process::Command`, routing its stdout/stderr through a
//! caller-selected [`OutputMode`] and reporting nonzero exits to a
//! [`crate::failures::FailureSink`].
//!
//! - [`command`] owns [`execute`], the spawn/dispatch/report wrapper.
//! - [`output`] implements the three output modes.
//! - [`lookup`] resolves executables on `PATH` so a missing binary
//!   fails up front with the attempted command line.

pub mod command;
pub mod lookup;
pub mod output;

pub use command::{execute, ExecOptions, ALWAYS_STREAM_ENV};
pub use output::{OutputMode, DEFAULT_DOT_TIMEOUT};
