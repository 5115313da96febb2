//! Error handling for terrafile-ify
//!
//! This module provides the error types and user-friendly error reporting for
//! the tool. The error system is designed around two core principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Error Categories
//!
//! - **Parsing**: [`TerrafileError::SourceParseError`], [`TerrafileError::ManifestParseError`]
//! - **Configuration**: [`TerrafileError::InvalidIgnorePattern`]
//! - **File System**: [`TerrafileError::WalkError`], [`TerrafileError::FileError`]
//! - **Vendoring executable**: [`TerrafileError::ExecutableNotFound`],
//!   [`TerrafileError::ExecutionFailed`]
//!
//! A module source that cannot be classified is *not* an error:
//! the reference is treated as non-git and the run continues.
//!
//! # Examples
//!
//! ```rust,no_run
//! use terrafileify_cli::core::{TerrafileError, user_friendly_error};
//!
//! let error = TerrafileError::ExecutableNotFound {
//!     binary: "terrafile".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use crate::core::file_error::FileOperationError;
use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for terrafile-ify operations
///
/// Every variant that concerns a file carries the offending path so the
/// single error message printed at the end of a failed run is actionable.
#[derive(Error, Debug)]
pub enum TerrafileError {
    /// A Terraform source file is not valid HCL
    #[error("Invalid Terraform source syntax in {file}")]
    SourceParseError {
        /// Path of the source file
        file: String,
        /// Parser diagnostic
        reason: String,
    },

    /// An existing Terrafile could not be decoded
    ///
    /// Existing manifests are authoritative, so a manifest that cannot be
    /// read back aborts the run instead of being silently replaced.
    #[error("Invalid Terrafile syntax in {file}")]
    ManifestParseError {
        /// Path of the manifest
        file: String,
        /// Decoder diagnostic
        reason: String,
    },

    /// The configured ignore pattern is not a valid glob
    #[error("Invalid ignore pattern '{pattern}'")]
    InvalidIgnorePattern {
        /// The pattern as given
        pattern: String,
        /// Why the glob compiler rejected it
        reason: String,
    },

    /// Traversal of the source tree failed
    #[error("Failed to walk directory tree at {path}")]
    WalkError {
        /// Path at which the walk failed
        path: String,
        /// Underlying error message
        reason: String,
    },

    /// The vendoring executable is not installed
    #[error("Vendoring executable '{binary}' not found in PATH")]
    ExecutableNotFound {
        /// Name of the executable that was looked up
        binary: String,
    },

    /// The vendoring executable exited unsuccessfully
    #[error("'{binary}' failed in {dir}: {status}")]
    ExecutionFailed {
        /// Name of the executable
        binary: String,
        /// Working directory it ran in
        dir: String,
        /// Exit status description
        status: String,
    },

    /// File operation with path context
    #[error(transparent)]
    FileError(#[from] FileOperationError),

    /// YAML conversion error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Generic error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context with user-friendly messages and suggestions
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The main error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Known [`TerrafileError`] variants anywhere in the error chain get tailored
/// suggestions; everything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let message = message_with_chain(&error);

    for cause in error.chain() {
        if let Some(known) = cause.downcast_ref::<TerrafileError>() {
            return create_error_context(known, message);
        }
        if let Some(file_error) = cause.downcast_ref::<FileOperationError>() {
            return ErrorContext::new(message).with_details(file_error.user_message());
        }
    }

    ErrorContext::new(message)
}

fn message_with_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

fn create_error_context(error: &TerrafileError, message: String) -> ErrorContext {
    match error {
        TerrafileError::SourceParseError {
            reason,
            ..
        } => ErrorContext::new(message)
            .with_details(reason.clone())
            .with_suggestion(
                "Fix the HCL syntax or exclude the file with --ignore; no files were modified",
            ),
        TerrafileError::ManifestParseError {
            file,
            reason,
        } => ErrorContext::new(message).with_details(reason.clone()).with_suggestion(format!(
            "{file} must be a YAML mapping of module name to {{source, version}}; fix or remove it"
        )),
        TerrafileError::InvalidIgnorePattern {
            reason,
            ..
        } => ErrorContext::new(message)
            .with_details(reason.clone())
            .with_suggestion("Use a glob such as '.terraform' or '*-old'"),
        TerrafileError::ExecutableNotFound {
            ..
        } => ErrorContext::new(message).with_suggestion(
            "Install terrafile or point --terrafile-binary at the vendoring executable",
        ),
        TerrafileError::ExecutionFailed {
            ..
        } => ErrorContext::new(message)
            .with_suggestion("Check the executable's output above; remaining directories were not processed"),
        TerrafileError::FileError(file_error) => {
            ErrorContext::new(message).with_details(file_error.user_message())
        }
        _ => ErrorContext::new(message),
    }
}
