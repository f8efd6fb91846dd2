//! Domain entities for size-targeted compression
//!
//! This module defines the core domain models: the byte budget a caller
//! requests, the job handed to a strategy, and the artifact a successful
//! compression produces.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::intake::FileCategory;

/// Caller-specified upper bound on the compressed artifact's size
///
/// Expressed in kilobytes; all comparisons happen on exact byte counts
/// (`kb * 1024`, integer arithmetic, no rounding ambiguity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SizeBudget(u32);

impl SizeBudget {
    /// Budget applied when the caller omits the target size parameter
    pub const DEFAULT_KB: u32 = 100;

    /// Create a budget from a kilobyte count
    pub fn from_kb(kb: u32) -> Self {
        Self(kb)
    }

    /// The budget in kilobytes, as requested by the caller
    pub fn kilobytes(&self) -> u32 {
        self.0
    }

    /// The budget as an exact byte count
    pub fn bytes(&self) -> u64 {
        u64::from(self.0) * 1024
    }

    /// Whether a file of `len` bytes fits within this budget
    pub fn fits(&self, len: u64) -> bool {
        len <= self.bytes()
    }
}

impl Default for SizeBudget {
    fn default() -> Self {
        Self(Self::DEFAULT_KB)
    }
}

impl std::fmt::Display for SizeBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} KB", self.0)
    }
}

/// One unit of compression work handed to a strategy
///
/// Constructed per request by the adapter layer (which owns path layout and
/// filename sanitization) and discarded after the response.
#[derive(Debug, Clone)]
pub struct CompressionJob {
    /// Path of the staged source file
    pub source: PathBuf,
    /// Path where the strategy writes its output
    pub output: PathBuf,
    /// The sanitized original filename, used as the archive entry name
    pub entry_name: String,
    /// The byte budget the output must fit within
    pub budget: SizeBudget,
}

/// The file produced by a successful compression
///
/// Invariant: an `Artifact` is only constructed for a file that exists on
/// disk with `size_bytes` no larger than the job's budget. Strategies enforce
/// this before returning one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// Name the artifact is retrieved by (its filename in the output dir)
    name: String,
    /// Full path of the artifact on disk
    path: PathBuf,
    /// Size of the artifact in bytes
    size_bytes: u64,
    /// The strategy class that produced it
    category: FileCategory,
    /// Timestamp when the artifact was produced
    created_at: DateTime<Utc>,
}

impl Artifact {
    /// Create a new artifact record
    pub fn new(name: String, path: PathBuf, size_bytes: u64, category: FileCategory) -> Self {
        Self {
            name,
            path,
            size_bytes,
            category,
            created_at: Utc::now(),
        }
    }

    /// Get the artifact's download name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the artifact's path on disk
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Get the artifact's size in bytes
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Get the artifact's size in whole kilobytes, rounded up
    pub fn final_size_kb(&self) -> u64 {
        self.size_bytes.div_ceil(1024)
    }

    /// Get the category of the strategy that produced the artifact
    pub fn category(&self) -> FileCategory {
        self.category
    }

    /// Get the production timestamp
    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }
}
