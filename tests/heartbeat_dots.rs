// tests/heartbeat_dots.rs

use std::time::Duration;

use cistep::exec::{execute, ExecOptions, OutputMode};
use cistep::status::StatusLogger;
use cistep_test_utils::capture::CaptureSink;
use cistep_test_utils::failures::RecordingFailures;
use cistep_test_utils::{init_tracing, with_timeout};

fn capture_logger() -> (StatusLogger, CaptureSink) {
    let sink = CaptureSink::new();
    let logger = StatusLogger::with_sink(sink.clone());
    (logger, sink)
}

fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

#[tokio::test]
async fn dots_tick_while_a_silent_command_sleeps() {
    init_tracing();
    let (logger, sink) = capture_logger();
    let failures = RecordingFailures::new();

    let mode = OutputMode::Heartbeat {
        dot_timeout: Duration::from_secs(1),
    };

    let status = with_timeout(execute(
        &failures,
        mode,
        &logger,
        &sh("sleep 3"),
        ExecOptions::default(),
    ))
    .await
    .expect("execute should succeed");

    assert_eq!(status, 0);

    // The ticker starts slightly after the child; depending on thread
    // teardown lag there may be one dot more or less. Timing-tolerant.
    let dots = sink.dot_count();
    assert!(
        (1..=3).contains(&dots),
        "expected 1..=3 dots, saw {dots}: {:?}",
        sink.contents()
    );
    assert_eq!(failures.count(), 0);
}

#[tokio::test]
async fn no_dot_after_a_fast_command_finishes() {
    init_tracing();
    let (logger, sink) = capture_logger();
    let failures = RecordingFailures::new();

    let mode = OutputMode::Heartbeat {
        dot_timeout: Duration::from_secs(1),
    };

    let status = with_timeout(execute(
        &failures,
        mode,
        &logger,
        &sh("true"),
        ExecOptions::default(),
    ))
    .await
    .expect("execute should succeed");

    // The done signal wakes the ticker immediately; the tick interval
    // never elapses for a sub-second command.
    assert_eq!(status, 0);
    assert_eq!(sink.dot_count(), 0);
}

#[tokio::test]
async fn failing_command_under_dots_still_replays_its_output() {
    init_tracing();
    let (logger, sink) = capture_logger();
    let failures = RecordingFailures::new();

    let mode = OutputMode::Heartbeat {
        dot_timeout: Duration::from_secs(30),
    };

    let status = with_timeout(execute(
        &failures,
        mode,
        &logger,
        &sh("echo boom 1>&2; exit 2"),
        ExecOptions::default(),
    ))
    .await
    .expect("execute should succeed");

    assert_eq!(status, 2);
    assert!(sink.contents().contains("boom"));
    assert_eq!(failures.count(), 1);
}
