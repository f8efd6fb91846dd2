//! API routes

pub mod compress;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    dto::compress::{CompressResponse, ErrorResponse},
    handlers, AppState, MAX_UPLOAD_BYTES,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::compress::compress_handler,
        handlers::download::download_handler,
        health_handler
    ),
    components(
        schemas(CompressResponse, ErrorResponse)
    ),
    tags(
        (name = "compression", description = "Size-targeted compression endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
    info(
        title = "ShrinkGate API",
        version = "0.1.0",
        description = "HTTP gateway for the Shrinkray size-targeted compression service"
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(compress::routes())
        .route("/health", axum::routing::get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    ),
    tag = "health"
)]
async fn health_handler() -> &'static str {
    "OK"
}
