//! Terraform source file handling.
//!
//! Parsing and printing are delegated to [`hcl_edit`], which keeps every
//! whitespace run and comment of the original text, so untouched parts of a
//! file print back byte for byte. This module only knows how to find
//! `module` blocks and read their `source` and `version` literals.
//!
//! Both the scan pass and the rewrite pass read declarations through
//! [`module_declaration`], so the two passes see the same strings and
//! compute the same identity keys.

use crate::constants::{MODULE_BLOCK_IDENT, SOURCE_ATTRIBUTE, VERSION_ATTRIBUTE};
use crate::core::TerrafileError;
use crate::reference::ModuleReference;
use hcl_edit::expr::Expression;
use hcl_edit::parser::parse_body;
use hcl_edit::structure::Body;
use std::path::Path;
use tracing::debug;

/// `source` and `version` literals of one module block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDeclaration {
    /// Value of the `source` string literal.
    pub source: String,
    /// Value of the `version` string literal, if present.
    pub version: Option<String>,
}

/// Parse Terraform source text read from `path`.
///
/// # Errors
///
/// Returns [`TerrafileError::SourceParseError`] naming `path` when the text is
/// not valid HCL.
pub fn parse(text: &str, path: &Path) -> Result<Body, TerrafileError> {
    parse_body(text).map_err(|e| TerrafileError::SourceParseError {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Value of attribute `key` in `body` if it is a plain string literal.
///
/// Templates (`"${var.x}"`), heredocs, and every other expression kind yield
/// `None`.
pub fn string_attribute<'a>(body: &'a Body, key: &str) -> Option<&'a str> {
    match &body.get_attribute(key)?.value {
        Expression::String(literal) => Some(literal.value().as_str()),
        _ => None,
    }
}

/// Declaration carried by the body of a `module` block.
///
/// Returns `None` when the block has no literal `source`.
pub fn module_declaration(body: &Body) -> Option<ModuleDeclaration> {
    let source = string_attribute(body, SOURCE_ATTRIBUTE)?;
    Some(ModuleDeclaration {
        source: source.to_string(),
        version: string_attribute(body, VERSION_ATTRIBUTE).map(str::to_string),
    })
}

/// All module references declared at the top level of `body`.
pub fn module_references(body: &Body, path: &Path) -> Vec<ModuleReference> {
    let mut references = Vec::new();

    for block in body.get_blocks(MODULE_BLOCK_IDENT) {
        match module_declaration(&block.body) {
            Some(declaration) => references.push(ModuleReference::new(
                declaration.source,
                declaration.version,
                path,
            )),
            None => debug!(
                "Skipping module block without a literal source in {}",
                path.display()
            ),
        }
    }

    references
}
