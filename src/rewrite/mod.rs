//! In-place rewriting of git module sources to their vendored paths.
//!
//! The rewriter edits the parsed syntax tree rather than the text. For every
//! top-level `module` block it re-reads the `source` and `version` literals
//! through [`source::module_declaration`], classifies them again, and looks
//! the resulting identity key up in the [`ReplacementMap`] built from the
//! scan. On a hit the `source` literal is replaced with the vendored path and
//! the `version` attribute, if any, is removed. Everything else in the file
//! prints back exactly as it was read.
//!
//! Rewriting is idempotent: a vendored path has no `git::` prefix, so a
//! second pass finds nothing to do and the file is not written again.
//!
//! ```rust
//! use terrafileify_cli::reference::{ModuleReference, ReplacementMap};
//! use terrafileify_cli::rewrite::Rewriter;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let text = "module \"x\" {\n  source = \"git::https://example.com/org/repo.git?ref=v2\"\n}\n";
//! let references = vec![ModuleReference::new(
//!     "git::https://example.com/org/repo.git?ref=v2",
//!     None,
//!     "main.tf",
//! )];
//!
//! let replacements = ReplacementMap::from_references(&references);
//! let rewritten = Rewriter::new(&replacements).rewrite_source(text, Path::new("main.tf"))?;
//!
//! assert_eq!(
//!     rewritten.as_deref(),
//!     Some("module \"x\" {\n  source = \"./vendor/modules/repo\"\n}\n")
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::constants::{MODULE_BLOCK_IDENT, SOURCE_ATTRIBUTE, VERSION_ATTRIBUTE};
use crate::core::FileOps;
use crate::reference::{ModuleReference, ReplacementMap};
use crate::source;
use crate::utils::fs::atomic_write;
use anyhow::{Context, Result};
use hcl_edit::expr::Expression;
use hcl_edit::structure::Body;
use std::path::Path;
use tracing::{debug, info, trace};

/// Rewrites module sources according to a replacement mapping.
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'a> {
    replacements: &'a ReplacementMap,
}

impl<'a> Rewriter<'a> {
    /// Create a rewriter for `replacements`.
    pub fn new(replacements: &'a ReplacementMap) -> Self {
        Self {
            replacements,
        }
    }

    /// Rewrite matching module blocks of `body` in place.
    ///
    /// `path` is only used to tag the transient references and for logging.
    /// Returns the number of blocks rewritten.
    pub fn rewrite_body(&self, body: &mut Body, path: &Path) -> usize {
        let mut rewritten = 0;

        for block in body.get_blocks_mut(MODULE_BLOCK_IDENT) {
            let Some(declaration) = source::module_declaration(&block.body) else {
                continue;
            };
            let had_version = declaration.version.is_some();

            let reference = ModuleReference::new(declaration.source, declaration.version, path);
            let Some(git) = reference.git() else {
                trace!("Leaving {reference} unchanged: not a git source");
                continue;
            };
            let Some(target) = self.replacements.get(&git.key()) else {
                debug!("Leaving {reference} unchanged: no vendored target for {}", git.key());
                continue;
            };

            if let Some(mut attribute) = block.body.get_attribute_mut(SOURCE_ATTRIBUTE) {
                if let Expression::String(literal) = attribute.value_mut() {
                    *literal.value_mut() = target.vendored_path.clone();
                }
            }
            if had_version {
                block.body.remove_attribute(VERSION_ATTRIBUTE);
            }

            debug!("Rewrote {reference} to {:?}", target.vendored_path);
            rewritten += 1;
        }

        rewritten
    }

    /// Rewrite Terraform source text read from `path`.
    ///
    /// Returns `None` when nothing in the text needs to change. The returned
    /// text always ends with a newline, and uses `\r\n` line endings when
    /// the input does.
    ///
    /// # Errors
    ///
    /// Fails if the text is not valid HCL.
    pub fn rewrite_source(&self, text: &str, path: &Path) -> Result<Option<String>> {
        let mut body = source::parse(text, path)?;

        if self.rewrite_body(&mut body, path) == 0 {
            return Ok(None);
        }

        let mut output = body.to_string();
        if !output.ends_with('\n') {
            output.push('\n');
        }
        if text.contains("\r\n") {
            output = output.replace("\r\n", "\n").replace('\n', "\r\n");
        }

        Ok((output != text).then_some(output))
    }

    /// Whether rewriting the file at `path` would change it.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    pub fn check_file(&self, path: &Path) -> Result<bool> {
        let text = FileOps::read_with_context(path, "checking Terraform source")?;
        Ok(self.rewrite_source(&text, path)?.is_some())
    }

    /// Rewrite the file at `path` in place, keeping its permission bits.
    ///
    /// Returns whether the file was written.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, parsed, or written. The original file
    /// is left untouched on failure.
    pub fn rewrite_file(&self, path: &Path) -> Result<bool> {
        let text = FileOps::read_with_context(path, "rewriting Terraform source")?;

        let Some(output) = self
            .rewrite_source(&text, path)
            .with_context(|| format!("Failed to rewrite {}", path.display()))?
        else {
            trace!("No changes to {}", path.display());
            return Ok(false);
        };

        let permissions =
            FileOps::metadata_with_context(path, "preserving file permissions")?.permissions();
        atomic_write(path, output.as_bytes(), Some(permissions))?;

        info!("Rewrote {}", path.display());
        Ok(true)
    }
}
