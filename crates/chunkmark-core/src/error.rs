//! Error types for Chunkmark operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! across all Chunkmark crates. Every error is scoped to a single document
//! or a single command; nothing here is retried.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in Chunkmark operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a specific file or directory.
    #[error("I/O error on {}: {source}", path.display())]
    IoWithPath {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The frontmatter block was present but could not be read as CRI data.
    #[error("Malformed frontmatter: {0}")]
    MalformedFrontmatter(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization error (manifests, config export).
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A document task panicked or was aborted.
    #[error("Task failed: {0}")]
    Task(String),
}

impl Error {
    /// Create an I/O error carrying the offending path.
    pub fn io_with_path(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source: err,
        }
    }

    /// Create a malformed frontmatter error.
    pub fn malformed_frontmatter(msg: impl Into<String>) -> Self {
        Self::MalformedFrontmatter(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create a task error.
    pub fn task(msg: impl Into<String>) -> Self {
        Self::Task(msg.into())
    }

    /// Whether this error came from the filesystem.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::IoWithPath { .. })
    }
}

/// Result type alias using Chunkmark's Error type.
pub type Result<T> = std::result::Result<T, Error>;
