//! Shared helpers for `cistep` tests: tracing setup, a watchdog
//! timeout, an in-memory status sink and a recording failure sink.

pub mod capture;
pub mod failures;

use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Uses `with_test_writer()`, so output is captured per-test and only
/// shown for failing tests (unless `-- --nocapture`). Levels come from
/// the environment, e.g. `RUST_LOG=debug cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Watchdog for async tests: everything here should finish well within
/// this bound, including the heartbeat cases that sleep a few seconds.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a future, panicking if it doesn't finish within [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(TEST_TIMEOUT, f)
        .await
        .expect("test timed out")
}
