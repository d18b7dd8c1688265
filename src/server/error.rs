//! API error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use serde_json::json;

use crate::errors::PipelineError;

/// API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub stage: Option<&'static str>,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            stage: None,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            stage: None,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "stage": self.stage,
                "status": self.status.as_u16(),
                "message": self.message,
            }
        }));
        (self.status, body).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        // Full detail for operators; the response carries stage + message.
        error!("pipeline failure at {}: {}", err.stage(), err);

        let status = match &err {
            PipelineError::ResponseParse(_) | PipelineError::Resource(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => err
                .upstream_status()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
        };

        Self {
            status,
            stage: Some(err.stage()),
            message: err.to_string(),
        }
    }
}
