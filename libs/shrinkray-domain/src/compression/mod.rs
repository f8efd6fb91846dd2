//! Compression domain module
//!
//! This module contains the core business logic and entities for
//! size-targeted compression. It defines what a compression job is, what an
//! artifact is, and how requests are dispatched to category strategies.

mod entity;
mod error;
mod service;

pub use entity::{Artifact, CompressionJob, SizeBudget};
pub use error::{CompressionError, Result};
pub use service::CompressionService;
