//! # Shrinkray Codec Adapters
//!
//! Infrastructure implementations of the domain's `SizeTargetingStrategy`
//! port, plus the filesystem workdir the service operates in:
//!
//! - [`JpegQualityStrategy`]: iterative JPEG quality search for images
//! - [`ZipArchiveStrategy`]: single-entry archiving for everything else
//! - [`Workdir`]: incoming/compressed directory layout and filename
//!   sanitization
//!
//! All codec work is blocking (disk I/O plus CPU-bound re-encoding) and runs
//! on the blocking thread pool so the async request path is never stalled.

pub mod infrastructure;

pub use infrastructure::{
    sanitize_filename, JpegQualityStrategy, Workdir, ZipArchiveStrategy,
};
