use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::{redact_secrets, LlmError};

/// Message returned when a required request field is absent.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing topic or platform";

/// Client-facing message for every provider failure.
pub const GENERATION_FAILED_MESSAGE: &str = "AI generation failed";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Topic must not be empty")]
    InvalidTopic,

    #[error("Unsupported platform: {platform}")]
    InvalidPlatform {
        platform: String,
        supported: Vec<&'static str>,
    },

    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::InvalidTopic => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string() }),
            ),
            AppError::InvalidPlatform { supported, .. } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string(), "supported": supported }),
            ),
            AppError::Provider(e) => {
                tracing::error!(
                    provider = e.provider(),
                    status = ?e.status(),
                    "LLM error: {}",
                    redact_secrets(&e.to_string())
                );
                let body = match e {
                    // Only the provider's own body is surfaced; transport errors can carry URLs.
                    LlmError::Api { body, .. } => json!({
                        "error": GENERATION_FAILED_MESSAGE,
                        "details": redact_secrets(body),
                    }),
                    _ => json!({ "error": GENERATION_FAILED_MESSAGE }),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": e.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
