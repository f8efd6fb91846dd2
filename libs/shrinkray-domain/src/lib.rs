//! # Shrinkray Domain Layer
//!
//! This crate contains the pure business logic and domain models for the
//! Shrinkray size-targeted compression service. It follows hexagonal
//! architecture principles:
//!
//! - **Entities**: Core domain models (CompressionJob, Artifact, SizeBudget)
//! - **Intake**: Extension allow-listing and category classification
//! - **Ports**: Trait definitions for external dependencies (SizeTargetingStrategy)
//! - **Services**: Business logic orchestration
//!
//! ## Architecture
//!
//! This layer has NO dependencies on infrastructure concerns (HTTP, codecs,
//! the filesystem layout). The actual compression machinery is expressed as a
//! trait (port) that adapter layers implement per file category.
//!
//! ## Example
//!
//! ```rust
//! use shrinkray_domain::compression::SizeBudget;
//! use shrinkray_domain::intake::IntakeGate;
//!
//! let gate = IntakeGate::with_defaults();
//! assert!(gate.validate("report.pdf"));
//! assert!(!gate.validate("malware.exe"));
//!
//! let budget = SizeBudget::from_kb(100);
//! assert_eq!(budget.bytes(), 102_400);
//! ```

pub mod compression;
pub mod intake;
pub mod ports;

// Re-export commonly used types
pub use compression::{Artifact, CompressionJob, CompressionService, SizeBudget};
pub use intake::{FileCategory, IntakeConfig, IntakeGate};
pub use ports::SizeTargetingStrategy;
