//! Validation of loaded env vars before anything is deployed.

use tracing::debug;

use crate::core::constants::{CREDENTIALS_KEY, RECOMMENDED_KEYS, REQUIRED_KEYS};
use crate::core::env::EnvVars;
use crate::error::{Result, ValidationError};

/// Outcome of a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    /// Recommended keys that are absent.
    pub missing_recommended: Vec<&'static str>,
}

/// Validate the required keys.
///
/// Required keys are checked in order and the first missing one is reported.
/// The credentials value must additionally parse as JSON.
///
/// # Errors
///
/// Returns `ValidationError::MissingKey` or `ValidationError::InvalidJson`.
pub fn validate(vars: &EnvVars) -> Result<Validated> {
    for key in REQUIRED_KEYS {
        if !vars.contains(key) {
            return Err(ValidationError::MissingKey(key.to_string()).into());
        }
    }

    if let Some(credentials) = vars.get(CREDENTIALS_KEY) {
        validate_json(CREDENTIALS_KEY, credentials)?;
    }

    let missing_recommended: Vec<&'static str> = RECOMMENDED_KEYS
        .iter()
        .copied()
        .filter(|key| !vars.contains(key))
        .collect();

    debug!(
        entries = vars.len(),
        missing_recommended = missing_recommended.len(),
        "env vars validated"
    );

    Ok(Validated {
        missing_recommended,
    })
}

/// Check that a value is well-formed JSON.
///
/// # Errors
///
/// Returns `ValidationError::InvalidJson` carrying the parser diagnostic.
pub fn validate_json(key: &str, value: &str) -> Result<()> {
    serde_json::from_str::<serde_json::Value>(value).map_err(|source| {
        ValidationError::InvalidJson {
            key: key.to_string(),
            source,
        }
    })?;
    Ok(())
}
