//! Request handlers

pub mod compress;
pub mod download;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shrinkray_domain::compression::CompressionError;

use crate::dto::compress::ErrorResponse;

/// Map a domain error onto the wire: 4xx for caller mistakes, 404 for
/// missing artifacts, 5xx for everything else
pub(crate) fn error_response(err: &CompressionError) -> Response {
    let status = match err {
        CompressionError::MissingFile
        | CompressionError::UnsupportedType(_)
        | CompressionError::InvalidTargetSize(_) => StatusCode::BAD_REQUEST,
        CompressionError::NotFound(_) => StatusCode::NOT_FOUND,
        CompressionError::TargetUnreachable { .. }
        | CompressionError::SourceUnreadable(_)
        | CompressionError::DestinationUnwritable(_)
        | CompressionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
