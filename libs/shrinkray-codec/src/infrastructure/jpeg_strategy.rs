//! JPEG quality-search strategy
//!
//! Implements the `SizeTargetingStrategy` port for images: decode once, then
//! re-encode as JPEG at decreasing quality levels until the output file fits
//! the byte budget.
//!
//! The loop checks the *output* file's size on every iteration. The service
//! this replaces compared the source file's size instead, which made the
//! continuation condition independent of the re-encoding work; fixing that
//! changes observable iteration counts versus a literal port.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use tracing::{debug, info, instrument, warn};

use shrinkray_domain::compression::{Artifact, CompressionError, CompressionJob};
use shrinkray_domain::intake::FileCategory;
use shrinkray_domain::ports::SizeTargetingStrategy;

/// Iterative JPEG quality search toward a byte budget
///
/// Starts at quality 95 and steps down by 5 until the encoded output fits
/// the budget or the floor of 10 has been tried. Bounded: at most 18 encodes
/// (95, 90, ..., 10), so the search always terminates.
///
/// When the source already fits the budget, it is copied through unchanged
/// (lossless passthrough) and no re-encode happens at all.
#[derive(Debug, Clone, Copy)]
pub struct JpegQualityStrategy {
    start_quality: u8,
    floor_quality: u8,
    step: u8,
}

impl JpegQualityStrategy {
    /// Create a strategy with explicit search parameters
    ///
    /// `step` must be non-zero; the search clamps at `floor_quality`.
    pub fn new(start_quality: u8, floor_quality: u8, step: u8) -> Self {
        Self {
            start_quality,
            floor_quality,
            step: step.max(1),
        }
    }
}

impl Default for JpegQualityStrategy {
    fn default() -> Self {
        Self::new(95, 10, 5)
    }
}

impl SizeTargetingStrategy for JpegQualityStrategy {
    #[instrument(skip(self, job), fields(source = %job.source.display(), budget_kb = job.budget.kilobytes()))]
    fn compress(
        &self,
        job: CompressionJob,
    ) -> impl std::future::Future<Output = Result<Artifact, CompressionError>> + Send {
        let params = *self;
        async move {
            tokio::task::spawn_blocking(move || encode_to_budget(params, &job))
                .await
                .map_err(|err| {
                    CompressionError::internal(format!("encoder task failed: {err}"))
                })?
        }
    }
}

fn encode_to_budget(
    params: JpegQualityStrategy,
    job: &CompressionJob,
) -> Result<Artifact, CompressionError> {
    let budget = job.budget.bytes();
    let source_len = fs::metadata(&job.source)
        .map_err(|err| {
            CompressionError::source_unreadable(format!("{}: {err}", job.source.display()))
        })?
        .len();

    // Lossless passthrough: the source already fits, so no re-encode. The
    // copy keeps the original filename since its bytes are untouched.
    if source_len <= budget {
        let dest = job.output.with_file_name(&job.entry_name);
        fs::copy(&job.source, &dest).map_err(|err| {
            CompressionError::destination_unwritable(format!("{}: {err}", dest.display()))
        })?;
        info!(size = source_len, "source within budget, passed through unchanged");
        return Ok(artifact_at(&dest, source_len));
    }

    let img = image::open(&job.source).map_err(|err| {
        CompressionError::source_unreadable(format!("{}: {err}", job.source.display()))
    })?;
    // JPEG carries no alpha channel
    let rgb = img.to_rgb8();

    let mut best_len = source_len;
    for quality in quality_ladder(&params) {
        write_jpeg(&job.output, &rgb, quality)?;
        let out_len = fs::metadata(&job.output).map_err(|err| {
            CompressionError::destination_unwritable(format!("{}: {err}", job.output.display()))
        })?
        .len();

        if out_len <= budget {
            info!(quality, size = out_len, "reached target size");
            return Ok(artifact_at(&job.output, out_len));
        }

        debug!(quality, size = out_len, "output over budget, lowering quality");
        best_len = out_len;
    }

    // Best-effort output stays on disk for the caller to inspect.
    warn!(size = best_len, budget, "quality floor hit, target unreachable");
    Err(CompressionError::target_unreachable(budget, best_len))
}

/// The quality levels the search tries, highest first, floor included
///
/// The ladder is what bounds the search: with the default parameters it is
/// exactly 18 entries (95, 90, ..., 10), so the encode loop terminates
/// regardless of image content.
fn quality_ladder(params: &JpegQualityStrategy) -> Vec<u8> {
    let mut ladder = Vec::new();
    let mut quality = params.start_quality;
    loop {
        ladder.push(quality);
        if quality <= params.floor_quality {
            return ladder;
        }
        quality = quality.saturating_sub(params.step).max(params.floor_quality);
    }
}

fn write_jpeg(path: &Path, rgb: &RgbImage, quality: u8) -> Result<(), CompressionError> {
    let file = File::create(path).map_err(|err| {
        CompressionError::destination_unwritable(format!("{}: {err}", path.display()))
    })?;
    let mut writer = BufWriter::new(file);
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    encoder.encode_image(rgb).map_err(|err| {
        CompressionError::destination_unwritable(format!("{}: {err}", path.display()))
    })?;
    writer.flush().map_err(|err| {
        CompressionError::destination_unwritable(format!("{}: {err}", path.display()))
    })
}

fn artifact_at(path: &Path, size_bytes: u64) -> Artifact {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Artifact::new(name, path.to_path_buf(), size_bytes, FileCategory::Image)
}
