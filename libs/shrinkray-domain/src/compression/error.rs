//! Domain errors for compression operations
//!
//! This module defines all possible errors that can occur while validating,
//! compressing, or retrieving files. These are domain-level errors that
//! abstract away infrastructure details.

use thiserror::Error;

/// Errors that can occur during size-targeted compression
///
/// These errors represent business-level failures and are independent of
/// codec or HTTP implementation details (e.g., no `image` or `zip` error
/// types here).
#[derive(Error, Debug)]
pub enum CompressionError {
    /// The request carried no file payload at all
    #[error("missing file")]
    MissingFile,

    /// The declared filename has no allowed extension
    #[error("invalid file type: {0:?}")]
    UnsupportedType(String),

    /// The target size parameter was not a valid positive integer
    #[error("invalid target size: {0:?}")]
    InvalidTargetSize(String),

    /// Bounded effort could not bring the output within the byte budget
    #[error("could not reach target size: budget {budget_bytes} bytes, best effort {best_bytes} bytes")]
    TargetUnreachable { budget_bytes: u64, best_bytes: u64 },

    /// The source file is missing, unreadable, or could not be decoded
    #[error("source unreadable: {0}")]
    SourceUnreadable(String),

    /// The output file or its directory could not be written
    #[error("destination unwritable: {0}")]
    DestinationUnwritable(String),

    /// The requested artifact does not exist
    #[error("artifact not found: {0:?}")]
    NotFound(String),

    /// An unexpected internal error occurred
    #[error("internal error: {0}")]
    Internal(String),
}

impl CompressionError {
    /// Create an unsupported type error for a declared filename
    pub fn unsupported_type(filename: impl Into<String>) -> Self {
        Self::UnsupportedType(filename.into())
    }

    /// Create an invalid target size error from the raw parameter
    pub fn invalid_target_size(raw: impl Into<String>) -> Self {
        Self::InvalidTargetSize(raw.into())
    }

    /// Create a target unreachable error from the budget and the best effort
    pub fn target_unreachable(budget_bytes: u64, best_bytes: u64) -> Self {
        Self::TargetUnreachable {
            budget_bytes,
            best_bytes,
        }
    }

    /// Create a source unreadable error with a message
    pub fn source_unreadable(msg: impl Into<String>) -> Self {
        Self::SourceUnreadable(msg.into())
    }

    /// Create a destination unwritable error with a message
    pub fn destination_unwritable(msg: impl Into<String>) -> Self {
        Self::DestinationUnwritable(msg.into())
    }

    /// Create a not found error for an artifact name
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the failure is the caller's fault (4xx-equivalent)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFile
                | Self::UnsupportedType(_)
                | Self::InvalidTargetSize(_)
                | Self::NotFound(_)
        )
    }
}

/// Result type alias for compression operations
pub type Result<T> = std::result::Result<T, CompressionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_error() {
        let err = CompressionError::unsupported_type("data.exe");
        assert!(matches!(err, CompressionError::UnsupportedType(_)));
        assert_eq!(err.to_string(), "invalid file type: \"data.exe\"");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_target_unreachable_error() {
        let err = CompressionError::target_unreachable(1024, 4096);
        assert!(matches!(err, CompressionError::TargetUnreachable { .. }));
        assert!(err.to_string().contains("1024"));
        assert!(err.to_string().contains("4096"));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_missing_file_error() {
        let err = CompressionError::MissingFile;
        assert_eq!(err.to_string(), "missing file");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_io_errors_are_server_side() {
        assert!(!CompressionError::source_unreadable("gone").is_client_error());
        assert!(!CompressionError::destination_unwritable("disk full").is_client_error());
        assert!(!CompressionError::internal("join failure").is_client_error());
    }

    #[test]
    fn test_not_found_error() {
        let err = CompressionError::not_found("ghost.zip");
        assert!(err.to_string().contains("ghost.zip"));
        assert!(err.is_client_error());
    }
}
