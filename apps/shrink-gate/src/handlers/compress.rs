//! Compression upload handler

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use tracing::{debug, error, info};

use shrinkray_codec::sanitize_filename;
use shrinkray_domain::compression::{CompressionError, SizeBudget};

use super::error_response;
use crate::dto::compress::{CompressResponse, ErrorResponse};
use crate::AppState;

/// Handle a multipart upload and compress it toward the target size
#[utoipa::path(
    post,
    path = "/compress",
    request_body(
        content = Vec<u8>,
        content_type = "multipart/form-data",
        description = "File upload with an optional target_size_kb field (kilobytes, default 100)"
    ),
    responses(
        (status = 201, description = "File compressed successfully", body = CompressResponse),
        (status = 400, description = "Missing file, invalid file type, or malformed target size", body = ErrorResponse),
        (status = 500, description = "Target size unreachable or internal failure", body = ErrorResponse)
    ),
    tag = "compression"
)]
pub async fn compress_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut upload: Option<(String, Bytes)> = None;
    let mut target_raw: Option<String> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let field_name = field.name().unwrap_or("").to_string();
                match field_name.as_str() {
                    "file" => {
                        let declared = field.file_name().map(str::to_owned);
                        match field.bytes().await {
                            Ok(data) => {
                                if let Some(name) = declared {
                                    upload = Some((name, data));
                                }
                            }
                            Err(err) => {
                                return error_response(&CompressionError::internal(format!(
                                    "failed to read file field: {err}"
                                )))
                            }
                        }
                    }
                    "target_size_kb" => match field.text().await {
                        Ok(text) => target_raw = Some(text),
                        Err(err) => {
                            return error_response(&CompressionError::invalid_target_size(
                                err.to_string(),
                            ))
                        }
                    },
                    other => {
                        debug!(field = other, "ignoring unknown multipart field");
                    }
                }
            }
            Ok(None) => break,
            Err(err) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("malformed multipart body: {err}"),
                    }),
                )
                    .into_response()
            }
        }
    }

    let Some((declared_name, data)) = upload else {
        return error_response(&CompressionError::MissingFile);
    };

    // A non-numeric target size is the caller's mistake, never silently
    // defaulted; an absent or empty field gets the 100 KB default.
    let budget = match target_raw.as_deref().map(str::trim) {
        None | Some("") => SizeBudget::default(),
        Some(raw) => match raw.parse::<u32>() {
            Ok(kb) => SizeBudget::from_kb(kb),
            Err(_) => return error_response(&CompressionError::invalid_target_size(raw)),
        },
    };

    info!(
        file = %declared_name,
        size = data.len(),
        budget_kb = budget.kilobytes(),
        "received compression request"
    );

    let Some(category) = state.service.gate().category_of(&declared_name) else {
        return error_response(&CompressionError::unsupported_type(&declared_name));
    };

    let Some(sanitized) = sanitize_filename(&declared_name) else {
        return error_response(&CompressionError::unsupported_type(&declared_name));
    };

    let staged = state.workdir.incoming_path(&sanitized);
    if let Err(err) = tokio::fs::write(&staged, &data).await {
        error!(path = %staged.display(), error = %err, "failed to stage upload");
        return error_response(&CompressionError::destination_unwritable(format!(
            "{}: {err}",
            staged.display()
        )));
    }

    let job = state.workdir.job(&sanitized, category, budget);
    let outcome = match tokio::time::timeout(
        state.compression_timeout,
        state.service.compress(&declared_name, job),
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(_) => Err(CompressionError::internal(format!(
            "compression timed out after {:?}",
            state.compression_timeout
        ))),
    };

    match outcome {
        Ok(artifact) => {
            info!(
                artifact = %artifact.name(),
                size = artifact.size_bytes(),
                "compression finished"
            );
            (
                StatusCode::CREATED,
                Json(CompressResponse {
                    download_url: format!("/download/{}", artifact.name()),
                    artifact: artifact.name().to_string(),
                    final_size_kb: artifact.final_size_kb(),
                    message: "file compressed successfully".to_string(),
                }),
            )
                .into_response()
        }
        Err(err) => {
            error!(file = %declared_name, error = %err, "compression failed");
            error_response(&err)
        }
    }
}
