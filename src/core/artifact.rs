//! Temporary env-vars file handed to `gcloud functions deploy --env-vars-file`.
//!
//! The file lives exactly as long as its [`EnvArtifact`] handle: it is removed
//! when the handle is dropped, whichever way the deployment ends.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::constants::{ARTIFACT_PREFIX, ARTIFACT_SUFFIX, CREDENTIALS_KEY};
use crate::core::env::EnvVars;
use crate::error::Result;

/// Scoped `KEY: 'value'` file on local disk.
#[derive(Debug)]
pub struct EnvArtifact {
    file: NamedTempFile,
}

impl EnvArtifact {
    /// Write the artifact into the system temp directory.
    ///
    /// # Errors
    ///
    /// Returns an io error if the file cannot be created or written. A
    /// partially written file is removed before returning.
    pub fn create(vars: &EnvVars) -> Result<Self> {
        Self::create_in(std::env::temp_dir(), vars)
    }

    /// Write the artifact into `dir`.
    ///
    /// # Errors
    ///
    /// Returns an io error if the file cannot be created or written.
    pub fn create_in(dir: impl AsRef<Path>, vars: &EnvVars) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(ARTIFACT_PREFIX)
            .suffix(ARTIFACT_SUFFIX)
            .tempfile_in(dir)?;

        let content = render(vars);
        file.write_all(content.as_bytes())?;
        file.flush()?;

        debug!(path = %file.path().display(), entries = vars.len(), "env artifact written");
        Ok(Self { file })
    }

    /// Path passed to the deploy tool.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file now, surfacing any deletion error.
    ///
    /// Dropping the artifact deletes it too, but silently.
    pub fn close(self) -> std::io::Result<()> {
        trace!(path = %self.file.path().display(), "removing env artifact");
        self.file.close()
    }
}

/// Render env vars as `KEY: 'value'` lines, in insertion order.
pub fn render(vars: &EnvVars) -> Zeroizing<String> {
    let mut out = Zeroizing::new(String::new());

    for (key, value) in vars.iter() {
        out.push_str(key);
        out.push_str(": '");
        if key == CREDENTIALS_KEY {
            // JSON only ever quotes with '"', so it goes in verbatim.
            out.push_str(value);
        } else {
            out.push_str(&escape_single_quotes(value));
        }
        out.push_str("'\n");
    }

    out
}

/// Double every `'`, as single-quoted YAML scalars expect.
pub fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', "''")
}
