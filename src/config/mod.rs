//! Run configuration for terrafile-ify
//!
//! A [`Config`] value is built once (normally from command-line flags) and
//! passed explicitly into every stage of a run: the scan, the manifest
//! builder, the rewriter and the vendoring executor. Nothing reads process
//! arguments or environment on its own, so every stage can be driven from
//! tests with a hand-built `Config`.
//!
//! # Ignore patterns
//!
//! The ignore pattern is a glob. `*` and `?` never match a path separator,
//! and a path is ignored when either its full path (as yielded by the walk,
//! e.g. `./envs/.terraform`) or its base name (`.terraform`) matches.
//!
//! ```rust
//! use terrafileify_cli::config::{Config, IgnorePattern};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::new("infra").with_ignore(IgnorePattern::new("*-old")?);
//!
//! assert!(config.ignore.matches(Path::new("infra/network-old")));
//! assert!(!config.ignore.matches(Path::new("infra/network")));
//! # Ok(())
//! # }
//! ```

use crate::constants::{DEFAULT_IGNORE_PATTERN, DEFAULT_TERRAFILE_BINARY};
use crate::core::TerrafileError;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled glob used to prune files and directories from the scan.
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    pattern: Pattern,
}

impl IgnorePattern {
    /// Compile `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`TerrafileError::InvalidIgnorePattern`] if the glob is malformed.
    pub fn new(pattern: &str) -> Result<Self, TerrafileError> {
        let pattern =
            Pattern::new(pattern).map_err(|e| TerrafileError::InvalidIgnorePattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            pattern,
        })
    }

    /// Whether `path` or its base name matches the pattern.
    pub fn matches(&self, path: &Path) -> bool {
        if self.pattern.matches_path_with(path, MATCH_OPTIONS) {
            return true;
        }
        path.file_name()
            .is_some_and(|name| self.pattern.matches_with(&name.to_string_lossy(), MATCH_OPTIONS))
    }

    /// The pattern as originally written.
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for IgnorePattern {
    fn default() -> Self {
        Self {
            pattern: Pattern::new(&Pattern::escape(DEFAULT_IGNORE_PATTERN))
                .expect("escaped literal is always a valid glob"),
        }
    }
}

/// Settings for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the scan starts from.
    pub root: PathBuf,
    /// Files and directories to leave out of the scan.
    pub ignore: IgnorePattern,
    /// Name or path of the vendoring executable.
    pub terrafile_binary: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            ignore: IgnorePattern::default(),
            terrafile_binary: DEFAULT_TERRAFILE_BINARY.to_string(),
        }
    }
}

impl Config {
    /// Default configuration scanning `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Replace the ignore pattern.
    #[must_use]
    pub fn with_ignore(mut self, ignore: IgnorePattern) -> Self {
        self.ignore = ignore;
        self
    }

    /// Replace the vendoring executable.
    #[must_use]
    pub fn with_terrafile_binary(mut self, binary: impl Into<String>) -> Self {
        self.terrafile_binary = binary.into();
        self
    }
}
