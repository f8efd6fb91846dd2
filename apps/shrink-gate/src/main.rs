//! ShrinkGate - HTTP gateway for size-targeted compression
//!
//! Accepts multipart uploads, compresses each one toward a caller-specified
//! target size (iterative JPEG quality search for images, single-entry
//! archiving for everything else), and serves the results for download.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use shrink_gate::{routes, AppState};
use shrinkray_codec::{JpegQualityStrategy, Workdir, ZipArchiveStrategy};
use shrinkray_domain::compression::CompressionService;
use shrinkray_domain::intake::IntakeGate;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting ShrinkGate compression service");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Data root holding the incoming/ and compressed/ directories
    let data_dir = std::env::var("SHRINKRAY_DATA_DIR").unwrap_or_else(|_| {
        info!("SHRINKRAY_DATA_DIR not set, using default: ./data");
        "./data".to_string()
    });

    info!(data_dir = %data_dir, "Initializing workdir");
    let workdir = Workdir::create(&data_dir)?;

    // Bound on one compression so a pathological input cannot block forever
    let timeout_secs = std::env::var("SHRINKRAY_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(30);

    // Create the compression service: one strategy per file category
    let service = CompressionService::new(
        IntakeGate::with_defaults(),
        JpegQualityStrategy::default(),
        ZipArchiveStrategy,
    );

    // Create shared application state
    let state = AppState {
        service: Arc::new(service),
        workdir: Arc::new(workdir),
        compression_timeout: Duration::from_secs(timeout_secs),
    };

    // Build HTTP router
    let app = routes::create_router(state);

    // Get bind address from environment
    let host = std::env::var("GATE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("GATE_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    info!(addr = %addr, "Starting HTTP server");

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
