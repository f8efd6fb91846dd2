//! Artifact download handler

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;
use tracing::{info, warn};

use shrinkray_domain::compression::CompressionError;

use super::error_response;
use crate::dto::compress::ErrorResponse;
use crate::AppState;

/// Stream a compressed artifact back as an attachment
#[utoipa::path(
    get,
    path = "/download/{artifact}",
    params(
        ("artifact" = String, Path, description = "Name of the artifact returned by /compress")
    ),
    responses(
        (status = 200, description = "Artifact bytes", content_type = "application/octet-stream"),
        (status = 404, description = "No such artifact", body = ErrorResponse)
    ),
    tag = "compression"
)]
pub async fn download_handler(
    State(state): State<AppState>,
    Path(artifact): Path<String>,
) -> Response {
    let Some(path) = state.workdir.artifact_path(&artifact) else {
        warn!(artifact = %artifact, "download name sanitized to nothing");
        return error_response(&CompressionError::not_found(artifact));
    };

    // Stream from disk instead of buffering whole artifacts in memory.
    match tokio::fs::File::open(&path).await {
        Ok(file) => {
            let size = file.metadata().await.map(|m| m.len()).unwrap_or(0);
            info!(artifact = %artifact, size, "serving artifact");
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| artifact.clone());
            (
                StatusCode::OK,
                [
                    (
                        header::CONTENT_TYPE,
                        "application/octet-stream".to_string(),
                    ),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                Body::from_stream(ReaderStream::new(file)),
            )
                .into_response()
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(artifact = %artifact, "artifact not found");
            error_response(&CompressionError::not_found(artifact))
        }
        Err(err) => error_response(&CompressionError::internal(format!(
            "{}: {err}",
            path.display()
        ))),
    }
}
