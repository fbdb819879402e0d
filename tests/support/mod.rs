//! Test support utilities for meli-deploy integration tests.
//!
//! Provides an isolated project directory, a private temp directory and
//! (on unix) a fake `gcloud` that records how it was called.

#![allow(dead_code)]

pub mod fixtures;
#[cfg(unix)]
pub mod gcloud;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// No process-global state is mutated: child processes get `.current_dir()`
/// and `TMPDIR` so tests can safely run in parallel.
pub struct Test {
    /// Project directory the binary runs in
    pub dir: TempDir,
    /// Directory the binary uses as its temp dir
    pub tmp: TempDir,
    /// Holds the fake gcloud and its recordings
    pub tools: TempDir,
    /// gcloud binary handed to meli-deploy
    pub gcloud: PathBuf,
}

impl Test {
    /// Create a new empty test environment.
    ///
    /// gcloud points at a path that doesn't exist until a fake is installed.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let tmp = TempDir::new().expect("failed to create temp tmpdir");
        let tools = TempDir::new().expect("failed to create tools dir");
        let gcloud = tools.path().join("gcloud");

        Self {
            dir,
            tmp,
            tools,
            gcloud,
        }
    }

    /// Create a test environment with the given .env contents.
    pub fn with_env(contents: &str) -> Self {
        let t = Self::new();
        t.write_env(contents);
        t
    }

    /// Write `.env` in the project directory.
    pub fn write_env(&self, contents: &str) {
        std::fs::write(self.dir.path().join(".env"), contents).expect("failed to write .env");
    }

    /// Write a file in the project directory.
    pub fn write_file(&self, name: &str, contents: &str) {
        std::fs::write(self.dir.path().join(name), contents).expect("failed to write file");
    }

    /// Files left behind in the binary's temp dir.
    pub fn leftover_temp_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.tmp.path())
            .expect("failed to read tmpdir")
            .map(|entry| entry.expect("bad dir entry").path())
            .collect()
    }
}
