//! Core types for terrafile-ify
//!
//! This module holds the error handling shared by every stage of a run:
//! - [`TerrafileError`] - Enumerated error types covering all failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-facing format
//! - [`file_error`] - File operation errors that always name the offending path
//!
//! Every fatal condition stops the whole invocation; the binary prints one
//! [`ErrorContext`] for the first failure and exits non-zero.

pub mod error;
pub mod file_error;

pub use error::{ErrorContext, TerrafileError, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileOps, FileResultExt};
