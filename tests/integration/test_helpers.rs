// tests/integration/test_helpers.rs

//! Shared fixtures for integration tests.

use spineljson::config::Config;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// A scratch directory holding JSON document files, plus the config used to run
/// commands against them.
pub struct TestContext {
    pub dir: TempDir,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a new test context with custom configuration.
    pub fn with_config(config: Config) -> Self {
        // Initialize tracing (ignore error if already initialized)
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::new("warn"))
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();

        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            config,
        }
    }

    /// Writes `contents` to `name` inside the scratch directory and returns its path.
    pub fn write_doc(&self, name: &str, contents: &str) -> String {
        let path = self.path_of(name);
        fs::write(&path, contents).expect("Failed to write document");
        path.to_string_lossy().into_owned()
    }

    /// Reads back the raw contents of `name`.
    pub fn read_doc(&self, name: &str) -> String {
        fs::read_to_string(self.path_of(name)).expect("Failed to read document")
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
