//! Intake gate - Extension allow-listing and category classification
//!
//! The intake gate is the first component every upload passes through. It is
//! a pure predicate over the declared filename: no I/O, no side effects.
//! Classification drives strategy dispatch downstream.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Compression strategy class selected by file extension
///
/// A closed enum so that dispatch is exhaustive at compile time instead of
/// stringly-typed branching on extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileCategory {
    /// Lossy re-encodable image (png, jpg, jpeg)
    Image,
    /// Any other allowed file; archived rather than re-encoded
    Generic,
}

/// Configuration for the intake gate
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Extensions accepted for upload (lowercase, without the dot)
    pub allowed_extensions: HashSet<String>,
    /// Subset of allowed extensions treated as images
    pub image_extensions: HashSet<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        let allowed = ["png", "jpg", "jpeg", "mp4", "zip", "txt", "pdf"];
        let images = ["png", "jpg", "jpeg"];
        Self {
            allowed_extensions: allowed.iter().map(|s| s.to_string()).collect(),
            image_extensions: images.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Validates declared filenames against an extension allow-list
///
/// The gate extracts the substring after the *last* dot, lowercases it, and
/// accepts iff it is a member of the allow-list. Deterministic edge behavior:
///
/// - no dot at all: rejected
/// - trailing dot (`"file."`): empty extension, rejected
/// - hidden-file style (`".bashrc"`): treated as having no extension, rejected
/// - multiple dots (`"a.tar.gz"`): the last segment wins
#[derive(Debug, Clone, Default)]
pub struct IntakeGate {
    config: IntakeConfig,
}

impl IntakeGate {
    /// Create an intake gate with the given configuration
    pub fn new(config: IntakeConfig) -> Self {
        Self { config }
    }

    /// Create an intake gate with the default allow-list
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Check whether a declared filename carries an allowed extension
    pub fn validate(&self, filename: &str) -> bool {
        self.category_of(filename).is_some()
    }

    /// Classify a declared filename, or `None` if it is not allowed
    pub fn category_of(&self, filename: &str) -> Option<FileCategory> {
        let ext = extension(filename)?.to_ascii_lowercase();
        if !self.config.allowed_extensions.contains(&ext) {
            return None;
        }
        if self.config.image_extensions.contains(&ext) {
            Some(FileCategory::Image)
        } else {
            Some(FileCategory::Generic)
        }
    }

    /// Get the gate configuration
    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }
}

/// Extract the extension of a filename: the substring after the last dot.
///
/// Returns `None` when the filename has no dot, when the extension is empty
/// (trailing dot), or when everything before the last dot is empty
/// (hidden-file style names such as `".bashrc"`).
pub fn extension(filename: &str) -> Option<&str> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}
