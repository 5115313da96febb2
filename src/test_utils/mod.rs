//! Test utilities for terrafile-ify
//!
//! Helpers shared by unit tests and, through the `test-utils` feature, by
//! the integration suite:
//! - [`init_test_logging`] - opt-in tracing output for a test run
//! - [`write_file`] - create a fixture file, parent directories included
//! - [`fixtures`] - Terraform and Terrafile snippets used across tests
//!
//! # Example
//!
//! ```rust,ignore
//! use terrafileify_cli::test_utils::{fixtures, write_file};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! write_file(temp.path(), "envs/prod/main.tf", &fixtures::git_module("x", "https://example.com/org/repo.git", Some("v2")));
//! ```

pub mod fixtures;

use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` if given, otherwise
/// `RUST_LOG` if it is set; with neither, tests run without a subscriber.
///
/// ```bash
/// RUST_LOG=terrafileify_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Write `content` to `root/relative`, creating parent directories.
///
/// Returns the full path of the written file.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create {}: {e}", parent.display()));
    }
    std::fs::write(&path, content)
        .unwrap_or_else(|e| panic!("Failed to write {}: {e}", path.display()));
    path
}
