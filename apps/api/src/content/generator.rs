//! Content Generation — runs one request through the full pipeline.
//!
//! Flow: validate → compose prompts → one provider call → split hashtags → result.
//!
//! Nothing is cached or persisted; a provider failure ends the request.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::content::composer::compose;
use crate::content::platforms::PlatformTable;
use crate::content::splitter::split;
use crate::errors::{AppError, MISSING_FIELDS_MESSAGE};
use crate::llm_client::LlmProvider;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for content generation. Fields are optional so that a missing
/// field is reported as `InvalidRequest` rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    pub topic: Option<String>,
    pub category: Option<String>,
    pub platform: Option<String>,
}

/// Ready-to-publish copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    /// Body text with hashtags removed, trimmed.
    pub text: String,
    /// Space-joined `#token` list.
    pub hashtags: String,
    pub platform: String,
    pub topic: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Generates copy for one request.
///
/// Missing or empty `topic`/`platform` fail before any provider call.
pub async fn generate_content(
    request: GenerateRequest,
    platforms: &PlatformTable,
    provider: &dyn LlmProvider,
) -> Result<GenerationResult, AppError> {
    let (topic, platform) = match (request.topic, request.platform) {
        (Some(topic), Some(platform)) if !topic.is_empty() && !platform.is_empty() => {
            (topic, platform)
        }
        _ => return Err(AppError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_string())),
    };

    let prompts = compose(&topic, request.category.as_deref(), &platform, platforms)?;

    info!(
        "Generating {} copy via {} ({})",
        platform,
        provider.name(),
        provider.model()
    );
    let raw = provider.generate(&prompts.system, &prompts.user).await?;

    let content = split(&raw);
    info!(
        "Generated {} copy: {} chars, {} hashtags",
        platform,
        content.body.len(),
        content.hashtags.len()
    );

    Ok(GenerationResult {
        hashtags: content.hashtag_line(),
        text: content.body,
        platform,
        topic,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
