use std::sync::Arc;

use crate::content::platforms::PlatformTable;
use crate::llm_client::LlmProvider;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Provider strategy chosen from config (chat-style or single-message).
    pub llm: Arc<dyn LlmProvider>,
    pub platforms: Arc<PlatformTable>,
}
