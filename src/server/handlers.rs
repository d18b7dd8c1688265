//! Pipeline API endpoints

use axum::Json;
use axum::extract::{Multipart, State};
use log::info;
use serde::Deserialize;
use uuid::Uuid;

use super::AppState;
use super::error::ApiError;
use crate::pipeline::PipelineResult;

/// Text entry point request body
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    /// Text to round-trip
    pub text: String,
    /// Source language code (e.g. "hi")
    pub language: String,
}

/// Run the round trip on raw text
pub async fn process_text(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<PipelineResult>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::bad_request("text must not be empty"));
    }
    if req.language.is_empty() {
        return Err(ApiError::bad_request("language must not be empty"));
    }

    let request_id = Uuid::new_v4();
    info!(
        "[{}] text request: {} chars, language {}",
        request_id,
        req.text.chars().count(),
        req.language
    );

    let result = state.pipeline.run_from_text(&req.text, &req.language).await?;
    Ok(Json(result))
}

/// Run the round trip on an uploaded recording
///
/// Expects multipart fields `audio` (the file) and `language` (text).
pub async fn process_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PipelineResult>, ApiError> {
    let mut audio: Option<(Option<String>, bytes::Bytes)> = None;
    let mut language: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("audio") => {
                let filename = field.file_name().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read audio field: {}", e)))?;
                audio = Some((filename, data));
            }
            Some("language") => {
                language = Some(field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("failed to read language field: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let (filename, data) = audio.ok_or_else(|| ApiError::bad_request("missing 'audio' file field"))?;
    let language = language
        .filter(|l| !l.is_empty())
        .ok_or_else(|| ApiError::bad_request("missing 'language' form field"))?;
    if data.is_empty() {
        return Err(ApiError::bad_request("audio upload is empty"));
    }

    let request_id = Uuid::new_v4();
    info!(
        "[{}] audio request: {} ({} bytes), language {}",
        request_id,
        filename.as_deref().unwrap_or("<unnamed>"),
        data.len(),
        language
    );

    let result = state
        .pipeline
        .run_from_audio(&data, filename.as_deref(), &language)
        .await?;
    Ok(Json(result))
}
