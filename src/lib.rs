//! terrafile-ify - vendor git-sourced Terraform modules
//!
//! Terraform modules imported straight from git (`source =
//! "git::https://...?ref=v1"`) are fetched at `terraform init` time. This
//! crate turns such imports into vendored ones in three steps:
//!
//! 1. **generate** a `Terrafile` in every directory that declares git
//!    modules, listing each repository and revision under a local name
//! 2. **execute** the `terrafile` tool in those directories to check the
//!    modules out under `vendor/modules/`
//! 3. **rewrite** the `source` of each git module block to
//!    `./vendor/modules/<name>` and drop its now meaningless `version`
//!
//! # Architecture Overview
//!
//! A run scans the tree once and feeds the resulting references to every
//! later stage:
//!
//! - [`scan`] - walk the tree and collect `module` declarations
//! - [`source`] - read `module` blocks out of parsed Terraform files
//! - [`reference`] - classify sources as git, compute identity keys and
//!   vendored targets
//! - [`manifest`] - build and merge the per-directory Terrafiles
//! - [`rewrite`] - edit module sources in place, preserving formatting
//! - [`executor`] - run the vendoring executable
//!
//! ## Supporting Modules
//! - [`cli`] - command-line interface
//! - [`config`] - run configuration threaded into every stage
//! - [`constants`] - fixed names, prefixes and paths
//! - [`core`] - error types and user-facing error reporting
//! - [`utils`] - atomic file writes
//!
//! # Identity keys
//!
//! A git reference is identified by its repository URL (without the `git::`
//! prefix and the `ref` parameter) and its revision, defaulting to `master`:
//!
//! ```text
//! git::https://example.com/org/network.git?ref=v1.2.0
//!   -> https://example.com/org/network.git:v1.2.0
//! ```
//!
//! The scan and the rewrite compute this key with the same function, which
//! is what makes a rewrite hit exactly the references that were vendored.
//!
//! # Terrafile Format
//!
//! ```yaml
//! network:
//!   source: https://example.com/org/network.git
//!   version: v1.2.0
//! ```
//!
//! Existing entries are never overwritten; see [`manifest`].

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod executor;
pub mod manifest;
pub mod reference;
pub mod rewrite;
pub mod scan;
pub mod source;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
