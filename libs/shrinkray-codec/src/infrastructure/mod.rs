//! Infrastructure adapters for the compression port and filesystem layout

mod jpeg_strategy;
mod workdir;
mod zip_strategy;

pub use jpeg_strategy::JpegQualityStrategy;
pub use workdir::{sanitize_filename, Workdir};
pub use zip_strategy::ZipArchiveStrategy;
