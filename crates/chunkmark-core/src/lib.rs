//! Chunkmark Core: shared errors and utilities.
//!
//! This crate provides the foundational types used across all Chunkmark
//! crates. It has no internal Chunkmark dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`util`]: Slug, path, and file utilities

pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};

pub use util::ids::{Slugger, slugify};
pub use util::paths::{ensure_dir, output_file_name, output_path, write_atomic};
