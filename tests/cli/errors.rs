//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.run(&["--help"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("meli-deploy") || out.contains("Usage"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.run(&["unknown-command"]);
    assert_failure(&output);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_verbose_flag_shows_debug_output() {
    let t = Test::with_env(SCENARIO_ENV);

    let output = t.run(&["--verbose", "check"]);
    assert_success(&output);
    assert_stderr_contains(&output, "loading env file");
}

#[test]
fn test_log_env_var_controls_output() {
    let t = Test::with_env(SCENARIO_ENV);

    let output = t
        .cmd()
        .env("MELI_DEPLOY_LOG", "meli_deploy=debug")
        .arg("check")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "env vars validated");
}

#[test]
fn test_quiet_by_default() {
    let t = Test::with_env(SCENARIO_ENV);

    let output = t.check();
    assert_success(&output);
    assert!(!stderr(&output).contains("loading env file"));
}

#[test]
fn test_log_never_contains_values() {
    let t = Test::with_env(SCENARIO_ENV);

    let output = t.run(&["--verbose", "check"]);
    assert_success(&output);
    assert!(!stderr(&output).contains("abc123"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.run(&["--version"]);
    assert_success(&output);
    assert_stdout_contains(&output, "meli-deploy");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.run(&["completions", "bash"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("_meli-deploy") || out.contains("complete"));
}

#[test]
fn test_completions_fish() {
    let t = Test::new();

    let output = t.run(&["completions", "fish"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(
        out.contains("complete") && out.contains("meli-deploy"),
        "fish completion should contain fish-specific syntax"
    );
}

#[test]
fn test_missing_env_file_exit_code_and_hint() {
    let t = Test::new();

    t.cmd()
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("env file not found"))
        .stderr(predicate::str::contains("GOOGLE_CREDENTIALS, URI_BD_GUATEVER, MELI_CLIENT_ID"));
}
