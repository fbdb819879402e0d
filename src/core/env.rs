//! Env file parsing.
//!
//! Reads dotenv-style `KEY=VALUE` files into an ordered [`EnvVars`] map.

use std::fmt;
use std::io;
use std::path::Path;
use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::error::{EnvError, Result};

/// Parsed environment variables.
///
/// Keys are unique: a repeated key overwrites the earlier value but keeps the
/// position of its first occurrence. Values are wiped from memory on drop.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    entries: Vec<(String, String)>,
}

impl EnvVars {
    /// Load and parse an env file.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::NotFound` if the file doesn't exist, or
    /// `EnvError::Read` if it cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading env file");

        let contents = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                EnvError::NotFound(path.to_path_buf())
            } else {
                EnvError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let vars = Self::parse(&contents);

        debug!(entries = vars.len(), "env file loaded");
        Ok(vars)
    }

    /// Parse env file contents.
    ///
    /// Skips empty lines, comments (lines starting with #) and lines without
    /// an `=`. Only the first `=` separates key from value; both sides are
    /// trimmed and the value is otherwise taken literally.
    pub fn parse(contents: &str) -> Self {
        let mut vars = Self::default();

        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) => vars.insert(key.trim(), value.trim()),
                None => trace!(line = lineno + 1, "skipping line without '='"),
            }
        }

        vars
    }

    /// Insert or overwrite a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => {
                existing.zeroize();
                *existing = value;
            }
            None => self.entries.push((key, value)),
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for EnvVars {
    fn drop(&mut self) {
        for (_, value) in self.entries.iter_mut() {
            value.zeroize();
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::default();
        for (key, value) in iter {
            vars.insert(key, value);
        }
        vars
    }
}

/// Lists keys only; values are secrets.
impl fmt::Debug for EnvVars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVars")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}
