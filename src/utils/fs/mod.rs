//! File system utilities.
//!
//! Every file terrafile-ify produces, manifests and rewritten Terraform
//! sources alike, goes through [`atomic_write`], so an interrupted run never
//! leaves a half-written file behind.

mod atomic;

pub use atomic::{atomic_write, safe_write};
