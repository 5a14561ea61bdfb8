// tests/run_entry.rs

use cistep::cli::{CliArgs, OutputArg};
use cistep::errors::CistepError;
use cistep::run;
use cistep_test_utils::{init_tracing, with_timeout};

fn base_args(command: &[&str]) -> CliArgs {
    CliArgs {
        output: OutputArg::OnFail,
        dot_timeout: 10,
        task: None,
        env: vec![],
        cwd: None,
        instant_fail: false,
        allow_failure: false,
        log_level: None,
        command: command.iter().map(|w| w.to_string()).collect(),
    }
}

#[tokio::test]
async fn run_returns_the_commands_exit_status() {
    init_tracing();

    let ok = with_timeout(run(base_args(&["true"]))).await.expect("run true");
    assert_eq!(ok, 0);

    let failed = with_timeout(run(base_args(&["false"]))).await.expect("run false");
    assert_eq!(failed, 1);
}

#[tokio::test]
async fn run_wraps_the_step_in_a_task_scope() {
    init_tracing();

    let mut args = base_args(&["true"]);
    args.task = Some("Sanity check".to_string());

    let status = with_timeout(run(args)).await.expect("run with task");
    assert_eq!(status, 0);
}

#[tokio::test]
async fn malformed_env_assignment_is_rejected() {
    init_tracing();

    let mut args = base_args(&["true"]);
    args.env = vec!["NOT_AN_ASSIGNMENT".to_string()];

    let err = with_timeout(run(args)).await.expect_err("run should fail");
    match err {
        CistepError::InvalidEnvVar(pair) => assert_eq!(pair, "NOT_AN_ASSIGNMENT"),
        other => panic!("expected InvalidEnvVar, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_key_env_assignment_is_rejected() {
    init_tracing();

    let mut args = base_args(&["true"]);
    args.env = vec!["=value".to_string()];

    let err = with_timeout(run(args)).await.expect_err("run should fail");
    assert!(matches!(err, CistepError::InvalidEnvVar(_)));
}
