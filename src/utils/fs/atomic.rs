//! Atomic file write operations using temp-and-rename strategy.

use crate::core::file_error::{FileOperation, FileResultExt};
use anyhow::{Context, Result};
use std::fs::Permissions;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Safely writes a string to a file using atomic operations.
///
/// Convenience wrapper around [`atomic_write`] for text content with default
/// permissions.
///
/// ```rust,no_run
/// use terrafileify_cli::utils::fs::safe_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// safe_write(Path::new("envs/prod/Terrafile"), "{}\n")?;
/// # Ok(())
/// # }
/// ```
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes(), None)
}

/// Atomically replaces `path` with `content`.
///
/// The content is written to a temporary file in the same directory, synced,
/// given `permissions` if provided, and then renamed over `path`. Readers
/// see either the old file or the new one, never a partial write.
///
/// # Errors
///
/// Fails if the temporary file cannot be created, written, or renamed. The
/// parent directory must already exist.
pub fn atomic_write(path: &Path, content: &[u8], permissions: Option<Permissions>) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).with_file_context(
        FileOperation::Write,
        parent,
        "creating temporary file",
    )?;

    temp.write_all(content).with_file_context(
        FileOperation::Write,
        temp.path(),
        "writing temporary file",
    )?;
    temp.as_file().sync_all().with_file_context(
        FileOperation::Write,
        temp.path(),
        "syncing temporary file",
    )?;

    if let Some(permissions) = permissions {
        temp.as_file().set_permissions(permissions).with_file_context(
            FileOperation::Permissions,
            path,
            "copying original permissions",
        )?;
    }

    temp.persist(path)
        .map_err(|e| e.error)
        .with_file_context(FileOperation::Write, path, "replacing file")
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
