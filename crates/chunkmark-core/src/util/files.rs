//! Async input discovery.
//!
//! Inputs given on the command line may be files or directories. Directories
//! are walked recursively and filtered by extension.

use async_walkdir::WalkDir;
use futures::StreamExt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Find all files with the given extension (without dot) below `base_path`.
///
/// Results are sorted so batch runs are deterministic.
pub async fn find_files(base_path: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut walker = WalkDir::new(base_path);

    while let Some(entry_result) = walker.next().await {
        let entry = entry_result.map_err(|e| {
            Error::io_with_path(std::io::Error::other(e.to_string()), base_path)
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        files.push(path);
    }

    files.sort();
    log::debug!(
        "Found {} .{} files under {}",
        files.len(),
        extension,
        base_path.display()
    );
    Ok(files)
}

/// Expand a list of file and directory inputs into a flat list of files.
///
/// Files are kept as given regardless of extension; directories contribute
/// every matching file below them. Anything else, including a missing path,
/// is passed through so that reading it fails for that document alone.
pub async fn collect_inputs(inputs: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(find_files(input, extension).await?);
        } else {
            if !input.is_file() {
                log::warn!("Input {} does not exist", input.display());
            }
            files.push(input.clone());
        }
    }
    Ok(files)
}
