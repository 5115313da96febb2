//! Discovery of Terraform source files and the module references they declare.
//!
//! The walk is depth-first, sorted by file name, and does not follow
//! symlinked directories. Directories matching the ignore pattern are pruned
//! together with everything below them; files matching it are skipped. Only
//! files with the `.tf` extension are yielded.
//!
//! Any unreadable or unparsable file aborts the scan: a partial reference
//! list would produce manifests and rewrites that silently miss modules.

use crate::config::Config;
use crate::constants::SOURCE_FILE_EXTENSION;
use crate::core::{FileOps, TerrafileError};
use crate::reference::ModuleReference;
use crate::source;
use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Everything one scan found.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Module references in file order, then declaration order.
    pub references: Vec<ModuleReference>,
    /// Every scanned source file, in walk order.
    pub files: Vec<PathBuf>,
}

/// Candidate Terraform source files under `config.root`.
///
/// # Errors
///
/// Returns [`TerrafileError::WalkError`] if a directory cannot be read.
pub fn walk(config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(&config.root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let pruned = entry.depth() > 0
                && entry.file_type().is_dir()
                && config.ignore.matches(entry.path());
            if pruned {
                debug!("Ignoring directory {}", entry.path().display());
            }
            !pruned
        });

    for entry in walker {
        let entry = entry.map_err(|e| TerrafileError::WalkError {
            path: e.path().unwrap_or(config.root.as_path()).display().to_string(),
            reason: e.to_string(),
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if path.extension() != Some(OsStr::new(SOURCE_FILE_EXTENSION)) {
            trace!("Skipping non-source file {}", path.display());
            continue;
        }
        if config.ignore.matches(path) {
            debug!("Ignoring file {}", path.display());
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}

/// Module references declared in the file at `path`.
///
/// # Errors
///
/// Fails if the file cannot be read or is not valid HCL.
pub fn scan_file(path: &Path) -> Result<Vec<ModuleReference>> {
    let text = FileOps::read_with_context(path, "scanning Terraform source")?;
    let body = source::parse(&text, path)?;
    let references = source::module_references(&body, path);

    debug!("Found {} module reference(s) in {}", references.len(), path.display());
    Ok(references)
}

/// Walk `config.root` and collect every module reference.
///
/// # Errors
///
/// Fails on the first walk, read, or parse error.
pub fn scan(config: &Config) -> Result<ScanResult> {
    let mut result = ScanResult::default();

    for path in walk(config)? {
        let references = scan_file(&path)
            .with_context(|| format!("Failed to scan Terraform source {}", path.display()))?;
        result.references.extend(references);
        result.files.push(path);
    }

    debug!(
        "Scanned {} file(s), {} module reference(s)",
        result.files.len(),
        result.references.len()
    );
    Ok(result)
}
