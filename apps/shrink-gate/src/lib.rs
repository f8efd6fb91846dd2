//! ShrinkGate - HTTP gateway for size-targeted compression
//!
//! Accepts multipart uploads, compresses them toward a caller-specified
//! target size, and serves the resulting artifacts for download.

pub mod dto;
pub mod handlers;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use shrinkray_codec::{JpegQualityStrategy, Workdir, ZipArchiveStrategy};
use shrinkray_domain::compression::CompressionService;

/// The concrete service the gateway runs: JPEG quality search for images,
/// single-entry archiving for everything else
pub type GateService = CompressionService<JpegQualityStrategy, ZipArchiveStrategy>;

/// Largest request body the gateway accepts (64 MB)
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GateService>,
    pub workdir: Arc<Workdir>,
    /// Wall-clock bound on one compression, so a pathological input cannot
    /// hold a request forever. The bound is response-side only: a blocking
    /// encode that outlives it keeps running detached and may still write
    /// its output file after the error response has been sent.
    pub compression_timeout: Duration,
}
