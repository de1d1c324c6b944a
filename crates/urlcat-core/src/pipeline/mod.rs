//! Fetch-and-concatenate pipeline.
//!
//! Loads the URL list, then fetches each URL strictly in order on the
//! calling thread and appends successful bodies to the output artifact.
//! Only input problems and output I/O errors abort a run; a failed fetch is
//! logged and skipped.

mod summary;

pub use summary::{ItemFailure, ItemSuccess, RunSummary};

use crate::fetch::Fetch;
use crate::output::OutputWriter;
use crate::report;
use crate::url_list::{self, InputError};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Fatal pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write failure manifest {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-run options that are not part of fetching itself.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Write a JSON failure manifest here after the loop.
    pub failures_path: Option<PathBuf>,
}

/// Run the pipeline: `input` must hold a JSON array of URL strings; the
/// combined artifact is written to `output` (truncated). Progress lines go to
/// `console`.
///
/// Write errors on `console` (e.g. a closed stdout pipe) are ignored on
/// purpose: the transcript is informational, and the artifact is still
/// completed rather than abandoned halfway through the list.
pub fn run(
    input: &Path,
    output: &Path,
    fetcher: &dyn Fetch,
    opts: &RunOptions,
    console: &mut dyn Write,
) -> Result<RunSummary, PipelineError> {
    let urls = url_list::load(input)?;
    let total = urls.len();
    let _ = writeln!(console, "Found {} URLs. Starting download...", total);
    tracing::info!(input = %input.display(), output = %output.display(), total, "starting run");

    let output_err = |source| PipelineError::Output {
        path: output.to_path_buf(),
        source,
    };
    let mut writer = OutputWriter::create(output).map_err(output_err)?;

    let mut summary = RunSummary {
        total,
        output_path: output.to_path_buf(),
        ..RunSummary::default()
    };

    for (i, url) in urls.into_iter().enumerate() {
        let index = i + 1;
        let _ = writeln!(console, "[{}/{}] Downloading: {}", index, total, url);

        match fetcher.fetch(&url) {
            Ok(body) => {
                writer
                    .append_item(index, &url, &body)
                    .map_err(output_err)?;
                tracing::debug!(index, url = %url, bytes = body.len(), "appended");
                summary.succeeded.push(ItemSuccess {
                    index,
                    url,
                    bytes: body.len() as u64,
                });
            }
            Err(e) => {
                let _ = writeln!(console, "Failed to download {}: {}", url, e);
                tracing::warn!(index, url = %url, kind = %e.kind(), "download failed: {}", e);
                summary.failed.push(ItemFailure {
                    index,
                    url,
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }

    summary.bytes_written = writer.finish().map_err(output_err)?;

    if let Some(path) = &opts.failures_path {
        report::write_manifest(path, &summary).map_err(|source| PipelineError::Report {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), failed = summary.failed.len(), "wrote failure manifest");
    }

    let _ = writeln!(console, "\nDone! Combined content saved to: {}", output.display());
    tracing::info!(
        succeeded = summary.succeeded.len(),
        failed = summary.failed.len(),
        bytes = summary.bytes_written,
        "run finished"
    );
    Ok(summary)
}
