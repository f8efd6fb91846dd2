//! Ports (trait definitions) for external dependencies
//!
//! This module defines the contracts (ports) that external adapters must
//! implement. Following hexagonal architecture, the domain defines what it
//! needs, and the infrastructure provides implementations.
//!
//! ## Static Dispatch
//!
//! We use native Rust async traits with `impl Future` return types instead of
//! `async_trait` to ensure zero-cost abstractions and static dispatch.

use std::future::Future;

use crate::compression::{Artifact, CompressionError, CompressionJob};

/// Port for one size-targeting compression strategy
///
/// A strategy takes a staged source file and produces exactly one output file
/// at the job's output path, at or below the job's byte budget. Known
/// implementations are iterative JPEG quality search for images and
/// single-entry archiving for everything else; new strategies (e.g. video
/// transcoding) plug in without touching the dispatch logic.
///
/// Implementations must:
/// - never delete the source file
/// - leave their best-effort output on disk even when the budget is missed
/// - return `CompressionError::TargetUnreachable` instead of an oversized
///   artifact
/// - convert codec and I/O errors to domain errors
pub trait SizeTargetingStrategy: Send + Sync {
    /// Compress the job's source file toward its byte budget
    ///
    /// # Returns
    ///
    /// An [`Artifact`] describing the output file, which exists on disk and
    /// fits the budget.
    ///
    /// # Errors
    ///
    /// - `CompressionError::SourceUnreadable` if the source is missing or
    ///   cannot be decoded
    /// - `CompressionError::DestinationUnwritable` if the output cannot be
    ///   written
    /// - `CompressionError::TargetUnreachable` if bounded effort cannot fit
    ///   the budget
    fn compress(
        &self,
        job: CompressionJob,
    ) -> impl Future<Output = Result<Artifact, CompressionError>> + Send;
}
