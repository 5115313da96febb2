//! Global constants used throughout the terrafile-ify codebase.
//!
//! Everything that both the scan pass and the rewrite pass depend on lives
//! here so that the two passes cannot drift apart.

/// Prefix that marks a Terraform module source as a git clone.
///
/// Sources without this prefix (registry addresses, local paths, other
/// getters) are passed through untouched by every stage.
pub const GIT_SOURCE_PREFIX: &str = "git::";

/// Query parameter that pins a git source to a revision.
pub const REF_QUERY_PARAM: &str = "ref";

/// Revision recorded for git sources that carry no `ref` query parameter.
///
/// Shared by the identity key and by manifest entries; the two must agree.
pub const DEFAULT_REVISION: &str = "master";

/// File name of the per-directory vendoring manifest.
pub const TERRAFILE_NAME: &str = "Terrafile";

/// Extension of the Terraform source files that are scanned and rewritten.
pub const SOURCE_FILE_EXTENSION: &str = "tf";

/// Local directory that vendored modules are checked out into, relative to
/// the directory of the manifest.
pub const VENDOR_MODULES_DIR: &str = "./vendor/modules";

/// Block identifier of Terraform module declarations.
pub const MODULE_BLOCK_IDENT: &str = "module";

/// Attribute holding a module's source address.
pub const SOURCE_ATTRIBUTE: &str = "source";

/// Attribute holding a module's explicit version constraint.
pub const VERSION_ATTRIBUTE: &str = "version";

/// Default ignore pattern; Terraform's own working directory.
pub const DEFAULT_IGNORE_PATTERN: &str = ".terraform";

/// Default name of the vendoring executable.
pub const DEFAULT_TERRAFILE_BINARY: &str = "terrafile";
