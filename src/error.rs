//! Error types.
//!
//! Every fatal condition of a deployment run is an [`Error`]. Warnings
//! (verification problems, cleanup failures) never become errors; they are
//! reported and the run carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for meli-deploy operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

/// Problems reading the environment file.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("env file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Required entries missing or malformed.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0} is not defined in the env file")]
    MissingKey(String),

    #[error("{key} is not valid JSON: {source}")]
    InvalidJson {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures of the external deploy tool.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{binary} CLI is not installed")]
    NotFound { binary: String },

    #[error("{binary} --version exited with {}", describe_code(.code))]
    ProbeFailed { binary: String, code: Option<i32> },

    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("deployment failed: {binary} exited with {}", describe_code(.code))]
    DeployFailed { binary: String, code: Option<i32> },

    #[error("deployment interrupted: {binary} was stopped")]
    Interrupted { binary: String },

    #[error("describe failed: {binary} exited with {}: {stderr}", describe_code(.code))]
    DescribeFailed {
        binary: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("describe returned malformed JSON: {0}")]
    DescribeParse(#[source] serde_json::Error),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[source] toml::de::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
