//! Post-deployment verification.
//!
//! Checks that the required keys made it into the deployed function. This is
//! diagnostics only; nothing here fails a deployment.

use std::collections::BTreeMap;

use crate::core::constants::{CREDENTIALS_KEY, REQUIRED_KEYS};
use crate::core::gcloud::{DeployTool, FunctionDescription};
use crate::core::config::FunctionConfig;
use crate::error::Result;

/// State of one required key on the deployed function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Configured,
    /// Present, but the credentials no longer parse as JSON.
    InvalidJson,
    Missing,
}

/// Per-key verification result, in required-key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub keys: Vec<(&'static str, KeyStatus)>,
}

impl VerifyReport {
    /// Build a report from deployed env vars.
    pub fn from_env(env: &BTreeMap<String, String>) -> Self {
        let keys = REQUIRED_KEYS
            .iter()
            .map(|&key| {
                let status = match env.get(key) {
                    None => KeyStatus::Missing,
                    Some(value) if key == CREDENTIALS_KEY => {
                        if serde_json::from_str::<serde_json::Value>(value).is_ok() {
                            KeyStatus::Configured
                        } else {
                            KeyStatus::InvalidJson
                        }
                    }
                    Some(_) => KeyStatus::Configured,
                };
                (key, status)
            })
            .collect();

        Self { keys }
    }

    /// Build a report from a describe result.
    pub fn from_description(description: &FunctionDescription) -> Self {
        Self::from_env(&description.environment_variables())
    }

    /// Whether every required key is configured and valid.
    pub fn is_healthy(&self) -> bool {
        self.keys
            .iter()
            .all(|(_, status)| *status == KeyStatus::Configured)
    }
}

/// Describe the deployed function and check its env vars.
///
/// # Errors
///
/// Propagates the tool's describe error; callers treat it as a warning.
pub fn verify(tool: &dyn DeployTool, function: &FunctionConfig) -> Result<VerifyReport> {
    let description = tool.describe(function)?;
    Ok(VerifyReport::from_description(&description))
}
