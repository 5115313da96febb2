//! Vendored locations for git module references.
//!
//! A git reference is vendored under a fixed local directory named after the
//! last path segment of its repository. The [`ReplacementMap`] built here is
//! what the rewrite pass consults to decide which `source` literals to
//! redirect.

use super::{ModuleReference, ReferenceKey};
use crate::constants::VENDOR_MODULES_DIR;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Local form of a git module reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendoredTarget {
    /// Name the module is vendored under.
    pub module_name: String,
    /// Path written into rewritten `source` attributes.
    pub vendored_path: String,
}

impl VendoredTarget {
    /// Target for a module vendored as `module_name`.
    pub fn for_module(module_name: impl Into<String>) -> Self {
        let module_name = module_name.into();
        let vendored_path = format!("{VENDOR_MODULES_DIR}/{module_name}");
        Self {
            module_name,
            vendored_path,
        }
    }
}

/// Mapping from reference identity to vendored target.
///
/// References from different repositories that share a final path segment
/// map to the same module name. This is not resolved; a warning is logged
/// and both keys keep pointing at the shared vendored path.
#[derive(Debug, Clone, Default)]
pub struct ReplacementMap {
    targets: BTreeMap<ReferenceKey, VendoredTarget>,
}

impl ReplacementMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the mapping for every git reference in `references`.
    ///
    /// Non-git references are skipped. When an explicit `version` attribute
    /// disagrees with the `ref` pinned in the URL, the URL wins and a
    /// warning is logged; the attribute is removed by the rewrite anyway.
    pub fn from_references(references: &[ModuleReference]) -> Self {
        let mut map = Self::new();
        let mut owners: BTreeMap<String, (ReferenceKey, PathBuf)> = BTreeMap::new();

        for reference in references {
            let Some(git) = reference.git() else {
                debug!("Not vendoring {reference}: not a git source");
                continue;
            };

            if let Some(version) = reference.version.as_deref().filter(|v| *v != git.revision()) {
                warn!(
                    "{reference} declares version {version:?} but resolves to revision {:?}; \
                     the revision from the source URL is used",
                    git.revision()
                );
            }

            let key = git.key();
            let target = git.vendor();

            match owners.entry(target.module_name.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert((key.clone(), git.origin_path().to_path_buf()));
                }
                Entry::Occupied(entry) if entry.get().0 != key => {
                    let (owner, owner_path) = entry.get();
                    warn!(
                        "{reference} is vendored as {:?}, which is also used by {owner} (in {})",
                        target.module_name,
                        owner_path.display()
                    );
                }
                Entry::Occupied(_) => {}
            }

            map.insert(key, target);
        }

        map
    }

    /// Record `target` for `key`, replacing any earlier target.
    pub fn insert(&mut self, key: ReferenceKey, target: VendoredTarget) {
        self.targets.insert(key, target);
    }

    /// Vendored target for `key`.
    pub fn get(&self, key: &ReferenceKey) -> Option<&VendoredTarget> {
        self.targets.get(key)
    }

    /// Number of distinct reference keys.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no git references were found.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Iterate over keys and targets in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ReferenceKey, &VendoredTarget)> {
        self.targets.iter()
    }
}
