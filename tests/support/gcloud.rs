//! Fake gcloud for end-to-end tests.
//!
//! A shell script that appends each invocation to `calls.log`, copies the
//! `--env-vars-file` it was given to `captured.yaml` (and its path to
//! `captured.path`), and answers `functions describe` from `describe.json`.

use super::Test;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Behaviour of the fake gcloud.
pub struct FakeGcloud {
    pub version_exit: i32,
    pub deploy_exit: i32,
    /// Seconds `deploy` sleeps after receiving the env-vars file.
    pub deploy_sleep: u32,
    /// Describe output; `None` makes describe fail.
    pub describe: Option<&'static str>,
}

impl Default for FakeGcloud {
    fn default() -> Self {
        Self {
            version_exit: 0,
            deploy_exit: 0,
            deploy_sleep: 0,
            describe: Some(super::DESCRIBE_HEALTHY),
        }
    }
}

impl Test {
    /// Install a fake gcloud with the given behaviour.
    pub fn install_gcloud(&self, fake: FakeGcloud) {
        let tools = self.tools.path();
        let describe_cmd = match fake.describe {
            Some(json) => {
                std::fs::write(tools.join("describe.json"), json).expect("write describe.json");
                format!("cat '{}'\n  exit 0", tools.join("describe.json").display())
            }
            None => "echo 'ERROR: (gcloud.functions.describe) network unreachable' >&2\n  exit 1"
                .to_string(),
        };

        let script = format!(
            r#"#!/bin/sh
echo "$*" >> '{log}'
if [ "$1" = "--version" ]; then
  echo "Google Cloud SDK 500.0.0"
  exit {version_exit}
fi
if [ "$1" = "functions" ] && [ "$2" = "deploy" ]; then
  while [ $# -gt 0 ]; do
    if [ "$1" = "--env-vars-file" ]; then
      cp "$2" '{captured}'
      echo "$2" > '{captured_path}'
    fi
    shift
  done
  sleep {deploy_sleep} >/dev/null 2>&1 </dev/null
  echo "Deploying function (may take a while - up to 2 minutes)...done."
  exit {deploy_exit}
fi
if [ "$1" = "functions" ] && [ "$2" = "describe" ]; then
  {describe_cmd}
fi
exit 0
"#,
            log = tools.join("calls.log").display(),
            captured = tools.join("captured.yaml").display(),
            captured_path = tools.join("captured.path").display(),
            version_exit = fake.version_exit,
            deploy_exit = fake.deploy_exit,
            deploy_sleep = fake.deploy_sleep,
            describe_cmd = describe_cmd,
        );

        std::fs::write(&self.gcloud, script).expect("write fake gcloud");
        std::fs::set_permissions(&self.gcloud, std::fs::Permissions::from_mode(0o755))
            .expect("chmod fake gcloud");
    }

    /// Invocations of the fake gcloud, one line each.
    pub fn gcloud_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.tools.path().join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Contents of the env-vars file gcloud received.
    pub fn captured_artifact(&self) -> String {
        std::fs::read_to_string(self.tools.path().join("captured.yaml"))
            .expect("gcloud never received an env-vars file")
    }

    /// Block until the fake has received an env-vars file.
    pub fn wait_for_deploy_start(&self) {
        let marker = self.tools.path().join("captured.path");
        let deadline = Instant::now() + Duration::from_secs(30);
        while !std::fs::read_to_string(&marker).is_ok_and(|p| p.ends_with('\n')) {
            assert!(Instant::now() < deadline, "gcloud deploy never started");
            std::thread::sleep(Duration::from_millis(50));
        }
    }

    /// Path of the env-vars file gcloud received.
    pub fn captured_artifact_path(&self) -> PathBuf {
        let path = std::fs::read_to_string(self.tools.path().join("captured.path"))
            .expect("gcloud never received an env-vars file");
        PathBuf::from(path.trim())
    }
}
