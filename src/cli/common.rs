//! Common utilities for CLI commands

use crate::config::Config;
use crate::manifest::{Terrafile, build_terrafiles};
use crate::scan::{self, ScanResult};
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Default filter when neither a flag nor `RUST_LOG` picks one.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Install the stderr log subscriber.
///
/// `level` overrides `RUST_LOG`; without either, only warnings and errors
/// are shown. Calling this more than once has no effect.
pub fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// State shared by every command of one invocation.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Run configuration
    pub config: Config,
    /// Suppress the summary printed on stdout
    pub quiet: bool,
}

impl CommandContext {
    /// Create a context for `config`.
    pub fn new(config: Config, quiet: bool) -> Self {
        Self {
            config,
            quiet,
        }
    }

    /// Scan the configured tree.
    ///
    /// # Errors
    ///
    /// Fails on the first file that cannot be walked, read, or parsed.
    pub fn scan(&self) -> Result<ScanResult> {
        scan::scan(&self.config)
    }

    /// Scan the tree and build the merged Terrafile of every directory.
    ///
    /// # Errors
    ///
    /// Fails if the scan fails or an existing Terrafile cannot be parsed.
    pub fn terrafiles(&self) -> Result<BTreeMap<PathBuf, Terrafile>> {
        let result = self.scan()?;
        build_terrafiles(&result.references)
    }

    /// Print a line to stdout unless running quietly.
    pub fn report(&self, message: impl std::fmt::Display) {
        if !self.quiet {
            println!("{message}");
        }
    }
}
