//! Axum route handlers for the Content API.

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;

use crate::content::generator::{generate_content, GenerateRequest, GenerationResult};
use crate::content::platforms::PlatformSpec;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PlatformListing {
    pub platform: &'static str,
    #[serde(flatten)]
    pub spec: PlatformSpec,
}

/// POST /  and  POST /api/generate
///
/// Body: `{ topic, category?, platform }`. Parsed from raw bytes so a missing
/// `Content-Type` header does not reject an otherwise valid JSON body.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerationResult>, AppError> {
    let request: GenerateRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidRequest(format!("Invalid JSON body: {e}")))?;

    let result = generate_content(request, &state.platforms, state.llm.as_ref()).await?;
    Ok(Json(result))
}

/// GET /api/platforms
pub async fn handle_list_platforms(State(state): State<AppState>) -> Json<Vec<PlatformListing>> {
    Json(
        state
            .platforms
            .iter()
            .map(|(platform, spec)| PlatformListing {
                platform,
                spec: spec.clone(),
            })
            .collect(),
    )
}
