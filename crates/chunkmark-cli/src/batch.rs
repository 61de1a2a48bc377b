//! Concurrent conversion of many documents.
//!
//! Each input runs in its own tokio task sharing one immutable
//! [`Processor`]. A failing document is recorded and the rest carry on;
//! pages are written atomically, so a failed document leaves nothing behind.

use chunkmark_content::Processor;
use chunkmark_core::util::paths::{ensure_dir, output_path, write_atomic};
use chunkmark_core::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Extension of rendered pages.
pub const HTML_EXTENSION: &str = "html";

/// Extension of section manifests.
pub const MANIFEST_EXTENSION: &str = "json";

/// Where and what a batch writes.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Output directory; created if missing.
    pub output_dir: PathBuf,
    /// Also write a `<stem>.json` manifest per page.
    pub manifest: bool,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Pages written, in input order.
    pub converted: Vec<PathBuf>,
    /// Inputs that failed, with their errors.
    pub failed: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    /// Whether every document converted.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Create the output directory. Safe to call repeatedly and concurrently.
pub async fn ensure_output_dir(path: &Path) -> Result<()> {
    ensure_dir(path).await?;
    log::debug!("Output directory ready: {}", path.display());
    Ok(())
}

/// Convert one document and write its page (and manifest, if asked).
///
/// Both outputs are rendered before anything is written. If the manifest
/// cannot be written the page is removed again, so a failed document leaves
/// no output behind. Returns the path of the written page.
pub async fn convert_file(
    processor: &Processor,
    input: &Path,
    options: &BatchOptions,
) -> Result<PathBuf> {
    let source = tokio::fs::read_to_string(input)
        .await
        .map_err(|e| Error::io_with_path(e, input))?;

    let doc = processor.process(&source, Some(input))?;

    let page = output_path(&options.output_dir, input, HTML_EXTENSION)?;
    let manifest = if options.manifest {
        let path = output_path(&options.output_dir, input, MANIFEST_EXTENSION)?;
        let json = serde_json::to_string_pretty(&doc.chunks)
            .map_err(|e| Error::serialization(e.to_string()))?;
        Some((path, json))
    } else {
        None
    };

    write_atomic(&page, doc.html.as_bytes()).await?;
    if let Some((path, json)) = manifest {
        if let Err(e) = write_atomic(&path, json.as_bytes()).await {
            if let Err(cleanup) = tokio::fs::remove_file(&page).await {
                log::warn!("Could not remove {}: {cleanup}", page.display());
            }
            return Err(e);
        }
    }

    log::info!(
        "{} -> {} ({} section(s))",
        input.display(),
        page.display(),
        doc.chunks.len()
    );
    Ok(page)
}

/// Convert every input concurrently.
///
/// Only a failure to create the output directory aborts the run; document
/// errors are collected in the report.
pub async fn run_batch(
    processor: Arc<Processor>,
    inputs: Vec<PathBuf>,
    options: BatchOptions,
) -> Result<BatchReport> {
    ensure_output_dir(&options.output_dir).await?;
    warn_on_name_collisions(&inputs);

    let options = Arc::new(options);
    let mut tasks = JoinSet::new();

    for (index, input) in inputs.iter().enumerate() {
        let processor = Arc::clone(&processor);
        let options = Arc::clone(&options);
        let path = input.clone();
        tasks.spawn(async move {
            let result = convert_file(&processor, &path, &options).await;
            (index, result)
        });
    }

    let mut results: Vec<Option<Result<PathBuf>>> = inputs.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => results[index] = Some(result),
            Err(e) => log::error!("Conversion task failed: {e}"),
        }
    }

    let mut report = BatchReport::default();
    for (input, result) in inputs.into_iter().zip(results) {
        match result.unwrap_or_else(|| Err(Error::task("conversion task did not complete"))) {
            Ok(page) => report.converted.push(page),
            Err(e) => {
                log::error!("{}: {e}", input.display());
                report.failed.push((input, e));
            }
        }
    }
    Ok(report)
}

fn warn_on_name_collisions(inputs: &[PathBuf]) {
    let mut seen = HashSet::new();
    for input in inputs {
        if let Some(stem) = input.file_stem() {
            if !seen.insert(stem.to_owned()) {
                log::warn!(
                    "{} shares its output name with an earlier input and will overwrite it",
                    input.display()
                );
            }
        }
    }
}
