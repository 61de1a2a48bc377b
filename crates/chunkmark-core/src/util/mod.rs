//! Utility modules for ids, output paths, and input discovery.
//!
//! # Modules
//!
//! - [`files`]: Async input discovery
//! - [`ids`]: ID normalization and slug generation
//! - [`paths`]: Output naming, directory setup, atomic writes

pub mod files;
pub mod ids;
pub mod paths;
