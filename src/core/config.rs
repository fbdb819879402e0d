//! Deployment configuration.
//!
//! Built-in defaults, optionally overridden by `meli-deploy.toml` and then by
//! command-line flags.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Full configuration for one deployment run.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    pub function: FunctionConfig,
    pub tool: ToolConfig,
    pub env: EnvConfig,
}

/// Parameters of the deployed function.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FunctionConfig {
    pub name: String,
    pub runtime: String,
    pub region: String,
    pub timeout: String,
    pub memory: String,
    /// Passed as `--project` when set; gcloud's active project otherwise.
    pub project: Option<String>,
    /// Overrides the URL printed after a successful deploy.
    pub url: Option<String>,
}

/// Deploy tool settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub gcloud: PathBuf,
}

/// Env file settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EnvConfig {
    pub file: PathBuf,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            name: constants::FUNCTION_NAME.to_string(),
            runtime: constants::RUNTIME.to_string(),
            region: constants::REGION.to_string(),
            timeout: constants::TIMEOUT.to_string(),
            memory: constants::MEMORY.to_string(),
            project: None,
            url: None,
        }
    }
}

impl FunctionConfig {
    /// Public URL of the deployed function.
    pub fn url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => constants::function_url(
                &self.region,
                self.project.as_deref().unwrap_or(constants::URL_PROJECT),
                &self.name,
            ),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            gcloud: PathBuf::from(constants::GCLOUD_BIN),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(constants::ENV_FILE),
        }
    }
}

impl DeployConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `meli-deploy.toml` in the
    /// current directory is used if present, built-in defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for a missing explicit path, or
    /// `ConfigError::Read` / `ConfigError::Parse` for unreadable files.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) if !p.exists() => return Err(ConfigError::NotFound(p.to_path_buf()).into()),
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(constants::CONFIG_FILE);
                if !default.exists() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::Read)?;
        Self::parse(&contents)
    }

    /// Parse TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed or has unknown fields.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e).into())
    }
}
