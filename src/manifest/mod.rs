//! Per-directory Terrafile manifests.
//!
//! A Terrafile lists the git modules a directory needs vendored, keyed by the
//! local module name:
//!
//! ```yaml
//! network:
//!   source: https://example.com/org/network.git
//!   version: v1.2.0
//! ```
//!
//! Keys are kept in a [`BTreeMap`] so the serialized file is sorted by name
//! and diffs cleanly between runs. The same flat mapping is used for reading
//! and writing.
//!
//! # Merge semantics
//!
//! An existing Terrafile is authoritative. [`Terrafile::merge`] only adds
//! entries for names that are not present yet; an entry that was written by
//! a previous run or edited by hand is never replaced, even when the newly
//! scanned reference points at a different source or revision.
//!
//! ```rust,no_run
//! use terrafileify_cli::manifest::build_terrafiles;
//! use terrafileify_cli::reference::ModuleReference;
//!
//! # fn example() -> anyhow::Result<()> {
//! let references = vec![ModuleReference::new(
//!     "git::https://example.com/org/repo.git?ref=v2",
//!     None,
//!     "envs/prod/main.tf",
//! )];
//!
//! for terrafile in build_terrafiles(&references)?.values() {
//!     if !terrafile.is_empty() {
//!         terrafile.save()?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use crate::constants::TERRAFILE_NAME;
use crate::core::{FileOps, TerrafileError};
use crate::reference::{GitReference, ModuleReference};
use crate::utils::fs::safe_write;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One vendored module as recorded in a Terrafile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrafileModule {
    /// Repository URL without the `git::` prefix or `ref` parameter.
    pub source: String,
    /// Revision to check out.
    pub version: String,
}

impl From<&GitReference> for TerrafileModule {
    fn from(git: &GitReference) -> Self {
        Self {
            source: git.repository_url().to_string(),
            version: git.revision().to_string(),
        }
    }
}

/// The Terrafile of one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terrafile {
    /// Location of the file, `<dir>/Terrafile`.
    pub path: PathBuf,
    /// Modules by local name.
    pub modules: BTreeMap<String, TerrafileModule>,
}

impl Terrafile {
    /// An empty Terrafile for `dir`.
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(TERRAFILE_NAME),
            modules: BTreeMap::new(),
        }
    }

    /// Load the Terrafile in `dir`, or start an empty one if there is none.
    ///
    /// A file that is empty or holds only whitespace counts as an empty
    /// manifest.
    ///
    /// # Errors
    ///
    /// Returns [`TerrafileError::ManifestParseError`] if the file exists but is
    /// not a valid Terrafile, and a file error if it cannot be read.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let mut terrafile = Self::new(dir);

        let Some(content) = FileOps::read_optional_with_context(&terrafile.path, "loading Terrafile")?
        else {
            debug!("No Terrafile at {}", terrafile.path.display());
            return Ok(terrafile);
        };

        if content.trim().is_empty() {
            debug!("Terrafile at {} is empty", terrafile.path.display());
            return Ok(terrafile);
        }

        terrafile.modules =
            serde_yaml::from_str(&content).map_err(|e| TerrafileError::ManifestParseError {
                file: terrafile.path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!(
            "Loaded {} module(s) from {}",
            terrafile.modules.len(),
            terrafile.path.display()
        );
        Ok(terrafile)
    }

    /// Directory this Terrafile belongs to.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// Add every git reference whose module name is not present yet.
    ///
    /// Returns the number of entries added.
    pub fn merge(&mut self, references: &[&ModuleReference]) -> usize {
        let mut added = 0;

        for reference in references {
            let Some(git) = reference.git() else {
                continue;
            };

            match self.modules.entry(git.module_name()) {
                Entry::Vacant(entry) => {
                    debug!("Adding {:?} to {}", entry.key(), self.path.display());
                    entry.insert(TerrafileModule::from(&git));
                    added += 1;
                }
                Entry::Occupied(entry) => {
                    debug!(
                        "Keeping existing entry {:?} in {} for {reference}",
                        entry.key(),
                        self.path.display()
                    );
                }
            }
        }

        added
    }

    /// Load the Terrafile in `dir` and merge `references` into it.
    ///
    /// # Errors
    ///
    /// Fails if an existing Terrafile cannot be read or parsed.
    pub fn for_dir(dir: &Path, references: &[&ModuleReference]) -> Result<Self> {
        let mut terrafile = Self::load_or_default(dir)?;
        terrafile.merge(references);
        Ok(terrafile)
    }

    /// Whether the Terrafile lists no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Whether the Terrafile has been written to disk.
    pub fn exists_on_disk(&self) -> bool {
        self.path.is_file()
    }

    /// Serialized form, as written by [`Terrafile::save`].
    ///
    /// # Errors
    ///
    /// Fails only if YAML serialization fails.
    pub fn to_yaml(&self) -> Result<String, TerrafileError> {
        Ok(serde_yaml::to_string(&self.modules)?)
    }

    /// Write the Terrafile, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let content = self.to_yaml()?;
        safe_write(&self.path, &content)
            .with_context(|| format!("Failed to save Terrafile {}", self.path.display()))?;

        info!("Wrote {} ({} module(s))", self.path.display(), self.modules.len());
        Ok(())
    }
}

/// Group references by the directory of the file that declared them.
///
/// References from a file without a parent directory component are grouped
/// under `.`.
pub fn group_by_dir(references: &[ModuleReference]) -> BTreeMap<PathBuf, Vec<&ModuleReference>> {
    let mut groups: BTreeMap<PathBuf, Vec<&ModuleReference>> = BTreeMap::new();

    for reference in references {
        let dir = match reference.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        groups.entry(dir).or_default().push(reference);
    }

    groups
}

/// Build the merged Terrafile of every directory that declares a module.
///
/// Directories whose references are all non-git still get an entry here;
/// their Terrafile is empty unless one already exists on disk.
///
/// # Errors
///
/// Fails on the first existing Terrafile that cannot be read or parsed.
pub fn build_terrafiles(references: &[ModuleReference]) -> Result<BTreeMap<PathBuf, Terrafile>> {
    let mut terrafiles = BTreeMap::new();

    for (dir, group) in group_by_dir(references) {
        let terrafile = Terrafile::for_dir(&dir, &group)
            .with_context(|| format!("Failed to build Terrafile for {}", dir.display()))?;
        terrafiles.insert(dir, terrafile);
    }

    Ok(terrafiles)
}
