//! Tests for `meli-deploy check`.

use crate::support::*;

#[test]
fn test_check_valid_env_without_gcloud() {
    let t = Test::with_env(SCENARIO_ENV);

    let output = t.check();
    assert_success(&output);
    assert_stdout_contains(&output, "env vars verified (3 keys)");
    assert_stdout_contains(&output, "GOOGLE_CREDENTIALS (required)");
    assert_stdout_contains(&output, "MELI_CLIENT_ID (required)");
    assert_no_temp_files(&t);
}

#[test]
fn test_check_missing_key() {
    let t = Test::with_env(MISSING_CLIENT_ID_ENV);

    let output = t.check();
    assert_failure(&output);
    assert_stderr_contains(&output, "MELI_CLIENT_ID is not defined in the env file");
    assert_stderr_contains(&output, "add MELI_CLIENT_ID=... to the env file");
}

#[test]
fn test_check_each_missing_key_is_named() {
    let full = [
        ("GOOGLE_CREDENTIALS", "{\"a\":1}"),
        ("URI_BD_GUATEVER", "mongodb://x"),
        ("MELI_CLIENT_ID", "abc123"),
    ];

    for (missing, _) in full {
        let env: String = full
            .iter()
            .filter(|(k, _)| *k != missing)
            .map(|(k, v)| format!("{}={}\n", k, v))
            .collect();
        let t = Test::with_env(&env);

        let output = t.check();
        assert_failure(&output);
        assert_stderr_contains(&output, &format!("{} is not defined", missing));
    }
}

#[test]
fn test_check_invalid_json() {
    let t = Test::with_env(INVALID_JSON_ENV);

    let output = t.check();
    assert_failure(&output);
    assert_stderr_contains(&output, "GOOGLE_CREDENTIALS is not valid JSON");
    // serde_json diagnostics carry a position
    assert_stderr_contains(&output, "line 1 column");
}

#[test]
fn test_check_ignores_comments_and_bad_lines() {
    let t = Test::with_env(COMPLEX_ENV);

    let output = t.check();
    assert_success(&output);
    assert_stdout_contains(&output, "env vars verified (4 keys)");
    assert_stdout_contains(&output, "GREETING");
    assert_stdout_excludes(&output, "THIS LINE");
}

#[test]
fn test_check_custom_env_file() {
    let t = Test::new();
    t.write_file("prod.env", SCENARIO_ENV);

    let output = t.run(&["check", "--env-file", "prod.env"]);
    assert_success(&output);
    assert_stdout_contains(&output, "reading env vars from prod.env");
}

#[test]
fn test_check_missing_env_file() {
    let t = Test::new();

    let output = t.check();
    assert_failure(&output);
    assert_eq!(output.status.code(), Some(1));
    assert_stderr_contains(&output, "env file not found: .env");
}
