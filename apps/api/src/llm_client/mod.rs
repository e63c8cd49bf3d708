/// LLM Client — the single point of entry for all provider calls.
///
/// ARCHITECTURAL RULE: No other module may talk to a provider endpoint directly.
/// Handlers depend on `dyn LlmProvider`; the concrete protocol is picked once at
/// startup from configuration, never from request input.
///
/// Each `generate` call issues exactly one HTTP request. There is no retry loop:
/// a failed call fails the whole generation.
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{Client, RequestBuilder};
use thiserror::Error;
use tracing::{debug, warn};

pub mod chat;
pub mod messages;

pub use chat::ChatProvider;
pub use messages::SingleMessageProvider;

#[derive(Debug, Error)]
pub enum LlmError {
    /// The provider answered with a non-success status. `body` is kept verbatim.
    #[error("{provider} API error (status {status}): {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} transport error: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned a malformed response: {reason}")]
    MalformedResponse {
        provider: &'static str,
        reason: String,
    },

    #[error("{provider} returned empty content")]
    EmptyContent { provider: &'static str },
}

impl LlmError {
    pub fn provider(&self) -> &'static str {
        match self {
            LlmError::Api { provider, .. }
            | LlmError::Transport { provider, .. }
            | LlmError::MalformedResponse { provider, .. }
            | LlmError::EmptyContent { provider } => *provider,
        }
    }

    /// HTTP status returned by the provider, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Api { status, .. } => Some(*status),
            LlmError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// A text-generation backend. Implementations differ only in wire protocol.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short provider identifier used in logs and error payloads.
    fn name(&self) -> &'static str;

    fn model(&self) -> &str;

    /// Sends one system/user prompt pair and returns the raw completion text.
    async fn generate(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

/// Provider credential. `Debug` never prints the value.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Which wire protocol to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Role-tagged message list (OpenAI Chat Completions and compatibles).
    Chat,
    /// One user message carrying both prompts (Anthropic Messages).
    SingleMessage,
}

impl ProviderKind {
    /// Environment variable holding this provider's credential.
    pub fn credential_env(self) -> &'static str {
        match self {
            ProviderKind::Chat => "OPENAI_API_KEY",
            ProviderKind::SingleMessage => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::Chat => chat::DEFAULT_BASE_URL,
            ProviderKind::SingleMessage => messages::DEFAULT_BASE_URL,
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Chat => chat::DEFAULT_MODEL,
            ProviderKind::SingleMessage => messages::DEFAULT_MODEL,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" | "chat" => Ok(ProviderKind::Chat),
            "anthropic" | "messages" => Ok(ProviderKind::SingleMessage),
            other => bail!("Unknown LLM provider '{other}' (expected 'openai' or 'anthropic')"),
        }
    }
}

/// Everything needed to construct a provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: ApiKey,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

/// Builds the configured provider strategy.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn LlmProvider>> {
    let client = Client::builder()
        .timeout(config.timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let provider: Arc<dyn LlmProvider> = match config.kind {
        ProviderKind::Chat => Arc::new(ChatProvider::new(
            client,
            &config.base_url,
            config.api_key.clone(),
            config.model.clone(),
        )),
        ProviderKind::SingleMessage => Arc::new(SingleMessageProvider::new(
            client,
            &config.base_url,
            config.api_key.clone(),
            config.model.clone(),
        )),
    };
    Ok(provider)
}

/// Sends a prepared request once and returns the success body as text.
/// Any non-success status becomes `LlmError::Api` with the body captured verbatim.
async fn send_once(provider: &'static str, request: RequestBuilder) -> Result<String, LlmError> {
    let response = request
        .send()
        .await
        .map_err(|source| LlmError::Transport { provider, source })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| LlmError::Transport { provider, source })?;

    if !status.is_success() {
        warn!("{provider} API returned {status}");
        return Err(LlmError::Api {
            provider,
            status: status.as_u16(),
            body,
        });
    }

    debug!("{provider} API returned {status} ({} bytes)", body.len());
    Ok(body)
}

/// Joins a base URL and an API path without doubling the slash.
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

lazy_static! {
    static ref SECRET_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"sk-[A-Za-z0-9_\-]{8,}").expect("valid secret pattern"),
        Regex::new(r"(?i)bearer\s+[A-Za-z0-9\-_\.=]+").expect("valid secret pattern"),
    ];
}

/// Scrubs credential-shaped tokens from provider text before it leaves the process.
pub fn redact_secrets(text: &str) -> String {
    let mut redacted = text.to_string();
    for pattern in SECRET_PATTERNS.iter() {
        redacted = pattern.replace_all(&redacted, "[REDACTED]").into_owned();
    }
    redacted
}
