//! Filesystem workdir for staged uploads and compressed artifacts
//!
//! The workdir owns the two process-wide directories the service operates
//! in. It is the only component that joins client-derived names onto paths,
//! and it sanitizes them first.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use shrinkray_domain::compression::{CompressionError, CompressionJob, SizeBudget};
use shrinkray_domain::intake::FileCategory;

/// The incoming/compressed directory pair under one data root
///
/// Uploads are staged under `incoming/`; strategies write their artifacts
/// under `compressed/`. Both directories are created if absent.
#[derive(Debug, Clone)]
pub struct Workdir {
    incoming: PathBuf,
    compressed: PathBuf,
}

impl Workdir {
    /// Create the workdir under a data root, creating directories as needed
    pub fn create(root: impl AsRef<Path>) -> Result<Self, CompressionError> {
        let root = root.as_ref();
        let incoming = root.join("incoming");
        let compressed = root.join("compressed");
        for dir in [&incoming, &compressed] {
            fs::create_dir_all(dir).map_err(|err| {
                CompressionError::destination_unwritable(format!("{}: {err}", dir.display()))
            })?;
        }
        info!(root = %root.display(), "workdir ready");
        Ok(Self {
            incoming,
            compressed,
        })
    }

    /// The directory uploads are staged in
    pub fn incoming(&self) -> &Path {
        &self.incoming
    }

    /// The directory artifacts are written to
    pub fn compressed(&self) -> &Path {
        &self.compressed
    }

    /// Path a sanitized upload is staged at
    pub fn incoming_path(&self, sanitized: &str) -> PathBuf {
        self.incoming.join(sanitized)
    }

    /// Build the compression job for a staged upload
    pub fn job(&self, sanitized: &str, category: FileCategory, budget: SizeBudget) -> CompressionJob {
        CompressionJob {
            source: self.incoming_path(sanitized),
            output: self.compressed.join(output_name(sanitized, category)),
            entry_name: sanitized.to_string(),
            budget,
        }
    }

    /// Resolve an artifact name to its path, sanitizing first
    ///
    /// Returns `None` when the name sanitizes to nothing; existence is the
    /// caller's concern.
    pub fn artifact_path(&self, name: &str) -> Option<PathBuf> {
        let sanitized = sanitize_filename(name)?;
        Some(self.compressed.join(sanitized))
    }
}

/// Name of the artifact a category strategy produces for a sanitized upload
///
/// Images re-encode to JPEG and take a `.jpg` suffix in place of the
/// original extension; everything else is archived under `<name>.zip`.
pub fn output_name(sanitized: &str, category: FileCategory) -> String {
    match category {
        FileCategory::Image => match sanitized.rsplit_once('.') {
            Some((stem, _)) => format!("{stem}.jpg"),
            None => format!("{sanitized}.jpg"),
        },
        FileCategory::Generic => format!("{sanitized}.zip"),
    }
}

/// Reduce a client-supplied filename to a safe path component
///
/// Keeps only the final path component, then maps every character outside
/// `[A-Za-z0-9._-]` to `_`. Returns `None` for names that reduce to nothing
/// or to dots only (which covers traversal sequences like `..`).
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let component = raw.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = component
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return None;
    }
    Some(cleaned)
}
