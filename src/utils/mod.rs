//! Utility helpers shared across terrafile-ify.
//!
//! - [`fs`] - atomic file replacement used for manifests and rewritten sources

pub mod fs;

pub use fs::{atomic_write, safe_write};
