//! Output path utilities.
//!
//! Every input document maps to exactly one output file inside a flat output
//! directory: the directory prefix is dropped and the extension replaced.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;

use crate::{Error, Result};

/// Derive the output file name for an input document.
///
/// Returns `None` if the input path has no usable file stem.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use chunkmark_core::util::paths::output_file_name;
///
/// assert_eq!(
///     output_file_name(Path::new("book/2-program-structure.md"), "html"),
///     Some("2-program-structure.html".to_string())
/// );
/// assert_eq!(output_file_name(Path::new("/"), "html"), None);
/// ```
pub fn output_file_name(input: &Path, extension: &str) -> Option<String> {
    let stem = input.file_stem()?.to_str()?;
    Some(format!("{stem}.{extension}"))
}

/// Join an output directory with the derived output file name.
pub fn output_path(output_dir: &Path, input: &Path, extension: &str) -> Result<PathBuf> {
    output_file_name(input, extension)
        .map(|name| output_dir.join(name))
        .ok_or_else(|| {
            Error::not_found(format!("no file name in input path {}", input.display()))
        })
}

/// Create a directory and its parents.
///
/// An existing directory is success, so concurrent callers can race on the
/// same path safely.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    match fs::create_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(Error::io_with_path(e, path)),
    }
}

/// Write a file so that readers see either the old content or the full new
/// content, never a partial write.
///
/// The content goes to a hidden sibling first and is then renamed over the
/// destination. Each call gets its own sibling, so concurrent writers to the
/// same destination never share a temporary file; the last rename wins.
pub async fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    static NEXT_TMP: AtomicU64 = AtomicU64::new(0);

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::not_found(format!("no file name in {}", path.display())))?;
    let tmp = path.with_file_name(format!(
        ".{file_name}.{}.{}.tmp",
        std::process::id(),
        NEXT_TMP.fetch_add(1, Ordering::Relaxed)
    ));

    if let Err(e) = fs::write(&tmp, contents).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(Error::io_with_path(e, &tmp));
    }
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(Error::io_with_path(e, path));
    }
    Ok(())
}
