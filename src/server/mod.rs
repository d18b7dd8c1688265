/*!
 * HTTP delivery surface for the pipeline.
 *
 * Two routes mirror the two pipeline entry points: POST /process-text takes
 * a JSON body, POST /process-audio takes a multipart upload. Both return
 * the unified pipeline result; failures come back as a single structured
 * error, never a partial result.
 */

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::pipeline::SpeechPipeline;

pub mod error;
pub mod handlers;

/// Uploads above this size are rejected before they reach the pipeline
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    /// The pipeline coordinator, shared across requests
    pub pipeline: Arc<SpeechPipeline>,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/process-text", post(handlers::process_text))
        .route("/process-audio", post(handlers::process_audio))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind `addr` and serve the API until the process exits
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind server address: {}", addr))?;

    info!("listening on {}", addr);
    axum::serve(listener, create_router(state))
        .await
        .context("HTTP server terminated unexpectedly")?;

    Ok(())
}
