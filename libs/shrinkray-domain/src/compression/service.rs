//! Compression service - Business logic orchestration
//!
//! This module contains the core dispatch logic for size-targeted
//! compression. The service validates the declared filename through the
//! intake gate and routes the job to the strategy for its category.

use super::{Artifact, CompressionError, CompressionJob};
use crate::intake::{FileCategory, IntakeGate};
use crate::ports::SizeTargetingStrategy;

/// Service for compressing uploaded files toward a byte budget
///
/// The service encapsulates the business rules of the compression pipeline:
/// - Validates the declared filename against the intake allow-list
/// - Selects the strategy for the file's category
/// - Delegates the actual work to the strategy port
///
/// ## Static Dispatch
///
/// The service is generic over one `SizeTargetingStrategy` implementation
/// per category. The compiler monomorphizes each combination, resulting in
/// zero-cost abstractions without trait objects.
pub struct CompressionService<I, G> {
    gate: IntakeGate,
    image_strategy: I,
    generic_strategy: G,
}

impl<I, G> CompressionService<I, G>
where
    I: SizeTargetingStrategy,
    G: SizeTargetingStrategy,
{
    /// Create a new service from an intake gate and one strategy per category
    pub fn new(gate: IntakeGate, image_strategy: I, generic_strategy: G) -> Self {
        Self {
            gate,
            image_strategy,
            generic_strategy,
        }
    }

    /// Get the intake gate
    pub fn gate(&self) -> &IntakeGate {
        &self.gate
    }

    /// Compress a staged file toward the job's byte budget
    ///
    /// This is the main entry point of the pipeline. It:
    /// 1. Classifies the declared filename through the intake gate
    /// 2. Dispatches the job to the strategy for that category
    /// 3. Returns the resulting artifact
    ///
    /// # Arguments
    ///
    /// * `declared_name` - The filename as declared by the uploader
    /// * `job` - The staged job (paths, entry name, budget)
    ///
    /// # Errors
    ///
    /// - `CompressionError::UnsupportedType` if the extension is not allowed
    /// - Any error the selected strategy reports (see
    ///   [`SizeTargetingStrategy::compress`])
    pub async fn compress(
        &self,
        declared_name: &str,
        job: CompressionJob,
    ) -> Result<Artifact, CompressionError> {
        match self.gate.category_of(declared_name) {
            Some(FileCategory::Image) => self.image_strategy.compress(job).await,
            Some(FileCategory::Generic) => self.generic_strategy.compress(job).await,
            None => Err(CompressionError::unsupported_type(declared_name)),
        }
    }
}
