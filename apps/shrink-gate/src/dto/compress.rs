//! DTOs for compression endpoints

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body for a successful compression
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompressResponse {
    /// Name of the produced artifact
    #[schema(example = "photo.jpg")]
    pub artifact: String,
    /// URL the artifact can be downloaded from
    #[schema(example = "/download/photo.jpg")]
    pub download_url: String,
    /// Final size of the artifact in whole kilobytes, rounded up
    #[schema(example = 96)]
    pub final_size_kb: u64,
    /// Success message
    #[schema(example = "file compressed successfully")]
    pub message: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error description
    #[schema(example = "invalid file type: \"data.exe\"")]
    pub error: String,
}
