//! Module references and their git classification.
//!
//! A [`ModuleReference`] is a `module` block as found in a Terraform source
//! file: its `source`, an optional `version`, and the file it came from.
//! [`ModuleReference::git`] decides whether the source is a git clone and, if
//! so, decomposes it into a [`GitReference`]: the repository URL with the
//! `git::` prefix and the `ref` query parameter removed, plus the pinned
//! revision taken from that parameter.
//!
//! # Identity
//!
//! [`GitReference::key`] is the only way to compute a [`ReferenceKey`]. The
//! scan pass uses it to build the replacement mapping and the rewrite pass
//! uses it again on literals re-read from the syntax tree; a rewrite happens
//! exactly when the two keys agree.
//!
//! ```rust
//! use terrafileify_cli::reference::ModuleReference;
//!
//! let reference = ModuleReference::new(
//!     "git::https://example.com/org/network.git?ref=v1.2.0",
//!     None,
//!     "envs/prod/main.tf",
//! );
//! let git = reference.git().unwrap();
//!
//! assert_eq!(git.repository_url(), "https://example.com/org/network.git");
//! assert_eq!(git.pinned_revision(), Some("v1.2.0"));
//! assert_eq!(git.key().as_str(), "https://example.com/org/network.git:v1.2.0");
//! assert_eq!(git.module_name(), "network");
//! ```

pub mod vendor;

pub use vendor::{ReplacementMap, VendoredTarget};

use crate::constants::{DEFAULT_REVISION, GIT_SOURCE_PREFIX, REF_QUERY_PARAM};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// A module declaration read from one Terraform source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReference {
    /// The declared source address, exactly as written in the literal.
    pub source: String,
    /// Explicit `version` attribute, if the block has one.
    pub version: Option<String>,
    /// File the declaration was read from.
    ///
    /// Manifests are placed in the parent directory of this path.
    pub path: PathBuf,
}

impl ModuleReference {
    /// Create a reference declared in `path`.
    pub fn new(
        source: impl Into<String>,
        version: Option<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            version,
            path: path.into(),
        }
    }

    /// Classify this reference as a git source.
    ///
    /// Returns `None` for sources without the `git::` prefix and for git
    /// sources that cannot be classified (see [`GitSourceError`]); the latter
    /// is logged and the reference is passed through like any other non-git
    /// source.
    pub fn git(&self) -> Option<GitReference> {
        match GitReference::from_source(&self.source, &self.path) {
            Ok(git) => git,
            Err(e) => {
                warn!("Skipping {self}: cannot classify git source: {e}");
                None
            }
        }
    }
}

impl fmt::Display for ModuleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} (in {})", self.source, self.path.display())
    }
}

/// Identity of a git module import.
///
/// Two references with equal keys are the same logical import regardless of
/// which file declared them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceKey(String);

impl ReferenceKey {
    /// The key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a `git::` source could not be classified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitSourceError {
    /// The remainder after `git::` is not a URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// scp-like `user@host:path` addresses are not supported.
    #[error("scp-style address {0:?} is not a URL")]
    ScpStyle(String),

    /// Neither the path nor the host yields a module name.
    #[error("no module name can be derived from {0:?}")]
    MissingModuleName(String),
}

/// A module reference whose source is a git clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitReference {
    repository_url: String,
    pinned_revision: Option<String>,
    module_name: String,
    path: PathBuf,
}

impl GitReference {
    /// Parse a raw module source.
    ///
    /// - `Ok(None)`: the source does not carry the `git::` prefix.
    /// - `Err(_)`: it does, but the remainder is not usable as a repository
    ///   address.
    ///
    /// Both absolute URLs (`https://...`, `ssh://...`) and scheme-less
    /// addresses (`github.com/org/repo.git`) are accepted. The `ref` query
    /// parameter is moved into the pinned revision; every other query
    /// segment stays on the repository URL exactly as written. An empty
    /// `ref=` counts as no pin.
    pub fn from_source(source: &str, path: &Path) -> Result<Option<Self>, GitSourceError> {
        let Some(stripped) = source.strip_prefix(GIT_SOURCE_PREFIX) else {
            return Ok(None);
        };

        let (rest, fragment) = match stripped.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (stripped, None),
        };
        let (base, query) = match rest.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (rest, None),
        };

        let module_name = match Url::parse(stripped) {
            Ok(url) => name_from_url(&url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                if is_scp_style(base) {
                    return Err(GitSourceError::ScpStyle(stripped.to_string()));
                }
                last_segment(base).to_string()
            }
            Err(e) => return Err(e.into()),
        };
        if module_name.is_empty() {
            return Err(GitSourceError::MissingModuleName(stripped.to_string()));
        }

        let (pinned_revision, kept) = match query {
            Some(query) => split_ref(query),
            None => (None, None),
        };

        let mut repository_url = base.to_string();
        if let Some(kept) = kept {
            repository_url.push('?');
            repository_url.push_str(&kept);
        }
        if let Some(fragment) = fragment {
            repository_url.push('#');
            repository_url.push_str(fragment);
        }

        debug!("Classified {source:?} as git repository {repository_url} at {pinned_revision:?}");

        Ok(Some(Self {
            repository_url,
            pinned_revision,
            module_name,
            path: path.to_path_buf(),
        }))
    }

    /// Repository URL without the `git::` prefix and without `ref`.
    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    /// Revision taken from the `ref` query parameter, if any.
    pub fn pinned_revision(&self) -> Option<&str> {
        self.pinned_revision.as_deref()
    }

    /// Pinned revision, or [`DEFAULT_REVISION`] when unpinned.
    pub fn revision(&self) -> &str {
        self.pinned_revision.as_deref().unwrap_or(DEFAULT_REVISION)
    }

    /// File the reference was declared in.
    pub fn origin_path(&self) -> &Path {
        &self.path
    }

    /// Identity key: repository URL and revision joined by `:`.
    pub fn key(&self) -> ReferenceKey {
        ReferenceKey(format!("{}:{}", self.repository_url(), self.revision()))
    }

    /// Local module name: the last path segment of the repository URL with a
    /// trailing `.git` removed.
    ///
    /// URLs without a path fall back to the host name.
    pub fn module_name(&self) -> String {
        self.module_name.clone()
    }

    /// Resolve this reference to its vendored location.
    pub fn vendor(&self) -> VendoredTarget {
        VendoredTarget::for_module(self.module_name())
    }
}

/// Module name of an absolute URL: its last path segment, else its host.
fn name_from_url(url: &Url) -> String {
    match last_segment(url.path()) {
        "" => url.host_str().unwrap_or_default().to_string(),
        segment => segment.to_string(),
    }
}

/// Last `/`-separated segment of `path`, ignoring trailing slashes, with a
/// `.git` suffix removed.
fn last_segment(path: &str) -> &str {
    let path = path.trim_end_matches('/');
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment.strip_suffix(".git").unwrap_or(segment)
}

/// `user@host:path` style: a `:` before the first `/`.
fn is_scp_style(address: &str) -> bool {
    let head = address.split('/').next().unwrap_or(address);
    head.contains(':')
}

/// Split the `ref` parameter out of a raw query string.
///
/// Returns the first non-empty `ref` value and the remaining segments joined
/// as written, or `None` when no segment remains.
fn split_ref(query: &str) -> (Option<String>, Option<String>) {
    let mut pinned_revision = None;
    let mut has_ref = false;
    let mut kept = Vec::new();

    for segment in query.split('&') {
        let decoded = url::form_urlencoded::parse(segment.as_bytes()).next();
        match decoded {
            Some((name, value)) if name == REF_QUERY_PARAM => {
                if !has_ref && !value.is_empty() {
                    pinned_revision = Some(value.into_owned());
                }
                has_ref = true;
            }
            _ => kept.push(segment),
        }
    }

    let kept = (!kept.is_empty()).then(|| kept.join("&"));
    (pinned_revision, kept)
}
