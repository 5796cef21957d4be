//! HTTP upload front end
//!
//! Accepts a multipart upload of image files, scans them in a per-request
//! scratch directory and answers with the text report as JSON.

mod types;
mod upload;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tracing::info;

pub use types::{ServerConfig, ServerConfigBuilder, DEFAULT_LISTEN_ADDR, DEFAULT_MAX_UPLOAD_BYTES};
pub use upload::{sanitize_file_name, AppState, UploadError, UploadResponse, REPORT_FILE_NAME, UPLOAD_FIELD};

pub fn router(config: &ServerConfig) -> Router {
    let state = Arc::new(AppState {
        scan: config.scan.clone(),
        scratch_parent: config.scratch_parent.clone(),
    });

    Router::new()
        .route("/upload", post(upload::upload_handler))
        .route("/health", get(|| async { "ok" }))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(state)
}

/// Serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    info!(addr = %config.listen_addr, "Starting upload server");

    axum::serve(listener, router(&config))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("upload server error")
}
