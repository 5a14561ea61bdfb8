// tests/lookup_paths.rs

use std::fs;
use std::os::unix::fs::PermissionsExt;

use cistep::exec::lookup::which;
use cistep_test_utils::init_tracing;

#[test]
fn finds_a_common_binary_on_path() {
    init_tracing();
    let found = which("sh").expect("sh should be on PATH");
    assert!(found.is_absolute());
    assert!(found.ends_with("sh"));
}

#[test]
fn misses_an_unknown_binary() {
    init_tracing();
    assert!(which("cistep-no-such-binary").is_none());
}

#[test]
fn resolves_an_explicit_path_when_executable() {
    init_tracing();
    let dir = tempfile::tempdir().expect("create tempdir");
    let script = dir.path().join("step.sh");
    fs::write(&script, "#!/bin/sh\nexit 0\n").expect("write script");

    let path_str = script.to_str().unwrap();

    // Not executable yet: direct lookup refuses it.
    assert!(which(path_str).is_none());

    let mut perms = fs::metadata(&script).expect("stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script, perms).expect("chmod script");

    assert_eq!(which(path_str), Some(script.clone()));
}

#[test]
fn a_directory_is_not_an_executable() {
    init_tracing();
    let dir = tempfile::tempdir().expect("create tempdir");
    assert!(which(dir.path().to_str().unwrap()).is_none());
}
