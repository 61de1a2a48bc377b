//! Per-document processing context.

use std::path::{Path, PathBuf};

use crate::markdown::frontmatter::CriTable;

/// State threaded through the stages of one document run.
#[derive(Debug, Clone, Default)]
pub struct ProcessingContext {
    /// Source path, used in log messages.
    pub path: Option<PathBuf>,
    /// CRI lookup table from the frontmatter, if any.
    pub cri: Option<CriTable>,
}

impl ProcessingContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the source path.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builder: set the CRI table.
    pub fn with_cri(mut self, table: CriTable) -> Self {
        self.cri = Some(table);
        self
    }

    /// Name for log messages: the path, or `<input>`.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .map_or_else(|| "<input>".to_string(), |p| p.display().to_string())
    }
}
