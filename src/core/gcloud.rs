//! Deploy tool abstraction and the gcloud CLI backend.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `DeployTool` trait
//! 2. Pass it to `runner::run` in place of [`Gcloud`]
//!
//! Tests substitute an in-memory fake so nothing touches the network.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, trace, warn};

use crate::core::config::FunctionConfig;
use crate::error::{Result, ToolError};

/// How often a running deploy checks for an interrupt.
const INTERRUPT_POLL: Duration = Duration::from_millis(100);

/// External deployment tool.
pub trait DeployTool {
    /// Name used in messages: the configured binary.
    fn name(&self) -> String;

    /// Confirm the tool is installed and runnable.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::NotFound` or `ToolError::ProbeFailed`.
    fn probe(&self) -> Result<()>;

    /// Deploy the function, streaming the tool's output to the console.
    ///
    /// Returns the tool's exit code, `None` if it was killed by a signal.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::Spawn` if the tool could not be started and
    /// `ToolError::Interrupted` if the run was cut short by an interrupt.
    fn deploy(&self, function: &FunctionConfig, env_file: &Path) -> Result<Option<i32>>;

    /// Fetch the deployed function's configuration.
    ///
    /// # Errors
    ///
    /// Returns `ToolError` on spawn failure, nonzero exit or malformed JSON.
    fn describe(&self, function: &FunctionConfig) -> Result<FunctionDescription>;

    /// The deploy invocation as a single printable line.
    fn command_line(&self, function: &FunctionConfig, env_file: &Path) -> String;
}

/// Subset of `gcloud functions describe --format json` output.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDescription {
    /// 2nd-gen functions keep runtime settings here.
    #[serde(default)]
    pub service_config: Option<ServiceConfig>,
    /// 1st-gen functions expose env vars at the top level.
    #[serde(default)]
    pub environment_variables: Option<BTreeMap<String, String>>,
}

/// `serviceConfig` block of a 2nd-gen function.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    #[serde(default)]
    pub environment_variables: Option<BTreeMap<String, String>>,
}

impl FunctionDescription {
    /// Parse describe output.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::DescribeParse` if the output isn't the expected JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ToolError::DescribeParse(e).into())
    }

    /// Deployed environment variables; empty if the description has none.
    pub fn environment_variables(&self) -> BTreeMap<String, String> {
        self.service_config
            .as_ref()
            .and_then(|sc| sc.environment_variables.clone())
            .or_else(|| self.environment_variables.clone())
            .unwrap_or_default()
    }
}

/// gcloud CLI backend.
#[derive(Debug, Clone)]
pub struct Gcloud {
    binary: PathBuf,
    interrupted: Option<Arc<AtomicBool>>,
}

impl Gcloud {
    /// Use the given binary name or path.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            interrupted: None,
        }
    }

    /// Stop a running deploy once `flag` is set.
    ///
    /// The flag is normally raised by a Ctrl-C handler; the child is killed
    /// and `deploy` returns `ToolError::Interrupted` so the caller still gets
    /// to clean up.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = Some(flag);
        self
    }

    /// Arguments for `gcloud functions deploy`.
    pub fn deploy_args(function: &FunctionConfig, env_file: &Path) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "functions".into(),
            "deploy".into(),
            function.name.clone(),
            "--runtime".into(),
            function.runtime.clone(),
            "--trigger-http".into(),
            "--allow-unauthenticated".into(),
            "--region".into(),
            function.region.clone(),
            "--env-vars-file".into(),
            env_file.display().to_string(),
            "--timeout".into(),
            function.timeout.clone(),
            "--memory".into(),
            function.memory.clone(),
        ];
        if let Some(project) = &function.project {
            args.push("--project".into());
            args.push(project.clone());
        }
        args
    }

    /// Arguments for `gcloud functions describe`.
    pub fn describe_args(function: &FunctionConfig) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "functions".into(),
            "describe".into(),
            function.name.clone(),
            "--region".into(),
            function.region.clone(),
            "--format".into(),
            "json".into(),
        ];
        if let Some(project) = &function.project {
            args.push("--project".into());
            args.push(project.clone());
        }
        args
    }

    fn spawn_error(&self, source: std::io::Error) -> ToolError {
        ToolError::Spawn {
            binary: self.name(),
            source,
        }
    }

    fn is_interrupted(&self) -> bool {
        self.interrupted
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Wait for the child, killing it if an interrupt arrives first.
    fn wait(&self, child: &mut Child) -> Result<ExitStatus> {
        if self.interrupted.is_none() {
            return Ok(child.wait().map_err(|e| self.spawn_error(e))?);
        }

        loop {
            if let Some(status) = child.try_wait().map_err(|e| self.spawn_error(e))? {
                // A terminal Ctrl-C reaches the child too; it may exit first.
                if self.is_interrupted() {
                    return Err(ToolError::Interrupted { binary: self.name() }.into());
                }
                return Ok(status);
            }

            if self.is_interrupted() {
                warn!(binary = %self.name(), "interrupted, stopping deploy");
                if let Err(e) = child.kill() {
                    debug!(error = %e, "kill after interrupt failed");
                }
                if let Err(e) = child.wait() {
                    debug!(error = %e, "reaping interrupted deploy failed");
                }
                return Err(ToolError::Interrupted { binary: self.name() }.into());
            }

            thread::sleep(INTERRUPT_POLL);
        }
    }
}

impl Default for Gcloud {
    fn default() -> Self {
        Self::new(crate::core::constants::GCLOUD_BIN)
    }
}

impl DeployTool for Gcloud {
    fn name(&self) -> String {
        self.binary.display().to_string()
    }

    fn probe(&self) -> Result<()> {
        let resolved = which::which(&self.binary).map_err(|_| ToolError::NotFound {
            binary: self.name(),
        })?;
        trace!(path = %resolved.display(), "resolved deploy tool");

        let status = Command::new(&resolved)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if !status.success() {
            return Err(ToolError::ProbeFailed {
                binary: self.name(),
                code: status.code(),
            }
            .into());
        }

        debug!(binary = %self.name(), "deploy tool available");
        Ok(())
    }

    fn deploy(&self, function: &FunctionConfig, env_file: &Path) -> Result<Option<i32>> {
        debug!(
            function = %function.name,
            region = %function.region,
            env_file = %env_file.display(),
            "running gcloud functions deploy"
        );

        let mut child = Command::new(&self.binary)
            .args(Self::deploy_args(function, env_file))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;
        let status = self.wait(&mut child)?;

        debug!(code = ?status.code(), "gcloud functions deploy finished");
        Ok(status.code())
    }

    fn describe(&self, function: &FunctionConfig) -> Result<FunctionDescription> {
        debug!(function = %function.name, "running gcloud functions describe");

        let output = Command::new(&self.binary)
            .args(Self::describe_args(function))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolError::DescribeFailed {
                binary: self.name(),
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        trace!(bytes = output.stdout.len(), "describe output received");
        FunctionDescription::from_json(&stdout)
    }

    fn command_line(&self, function: &FunctionConfig, env_file: &Path) -> String {
        std::iter::once(self.name())
            .chain(Self::deploy_args(function, env_file))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
