//! Single-entry zip archive strategy
//!
//! Implements the `SizeTargetingStrategy` port for non-image files: the
//! source is wrapped in a zip archive whose only entry carries the original
//! filename, so extraction reproduces the upload byte for byte.
//!
//! Unlike the service this replaces, the byte budget is enforced here too:
//! an archive that still exceeds the budget is reported as unreachable
//! instead of silently succeeding.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{info, instrument, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use shrinkray_domain::compression::{Artifact, CompressionError, CompressionJob};
use shrinkray_domain::intake::FileCategory;
use shrinkray_domain::ports::SizeTargetingStrategy;

/// Wraps the source file in a single-entry deflate archive
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveStrategy;

impl SizeTargetingStrategy for ZipArchiveStrategy {
    #[instrument(skip(self, job), fields(source = %job.source.display(), budget_kb = job.budget.kilobytes()))]
    fn compress(
        &self,
        job: CompressionJob,
    ) -> impl std::future::Future<Output = Result<Artifact, CompressionError>> + Send {
        async move {
            tokio::task::spawn_blocking(move || archive_to_budget(&job))
                .await
                .map_err(|err| {
                    CompressionError::internal(format!("archiver task failed: {err}"))
                })?
        }
    }
}

fn archive_to_budget(job: &CompressionJob) -> Result<Artifact, CompressionError> {
    let mut source = File::open(&job.source).map_err(|err| {
        CompressionError::source_unreadable(format!("{}: {err}", job.source.display()))
    })?;

    let out = File::create(&job.output).map_err(|err| {
        CompressionError::destination_unwritable(format!("{}: {err}", job.output.display()))
    })?;
    let mut zip = ZipWriter::new(BufWriter::new(out));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(job.entry_name.as_str(), options)
        .and_then(|()| io::copy(&mut source, &mut zip).map_err(zip::result::ZipError::Io))
        .map_err(|err| {
            CompressionError::destination_unwritable(format!("{}: {err}", job.output.display()))
        })?;

    let mut inner = zip.finish().map_err(|err| {
        CompressionError::destination_unwritable(format!("{}: {err}", job.output.display()))
    })?;
    inner.flush().map_err(|err| {
        CompressionError::destination_unwritable(format!("{}: {err}", job.output.display()))
    })?;

    let archive_len = fs::metadata(&job.output)
        .map_err(|err| {
            CompressionError::destination_unwritable(format!("{}: {err}", job.output.display()))
        })?
        .len();

    if !job.budget.fits(archive_len) {
        // archive stays on disk as the best effort
        warn!(size = archive_len, budget = job.budget.bytes(), "archive exceeds budget");
        return Err(CompressionError::target_unreachable(
            job.budget.bytes(),
            archive_len,
        ));
    }

    info!(entry = %job.entry_name, size = archive_len, "archived within budget");
    Ok(artifact_at(&job.output, archive_len))
}

fn artifact_at(path: &Path, size_bytes: u64) -> Artifact {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Artifact::new(name, path.to_path_buf(), size_bytes, FileCategory::Generic)
}
