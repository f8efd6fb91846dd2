//! Compression routes

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{compress::compress_handler, download::download_handler};
use crate::AppState;

/// Create compression and download routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/compress", post(compress_handler))
        .route("/download/:artifact", get(download_handler))
}
