//! Single-message provider — Anthropic Messages API.
//!
//! No distinct system role is sent: the system and user prompts are joined
//! into one user message, and the first text content block is the result.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{endpoint, send_once, ApiKey, LlmError, LlmProvider};

pub const PROVIDER_NAME: &str = "anthropic";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [UserMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl MessagesResponse {
    /// Takes the text of the first text block.
    fn into_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text)
    }
}

/// Joins the prompt pair into the single message this protocol accepts.
fn combine_prompts(system: &str, user: &str) -> String {
    format!("{system}\n\n{user}")
}

/// Messages API client authenticated with an `x-api-key` header.
#[derive(Clone)]
pub struct SingleMessageProvider {
    client: Client,
    url: String,
    api_key: ApiKey,
    model: String,
}

impl SingleMessageProvider {
    pub fn new(client: Client, base_url: &str, api_key: ApiKey, model: String) -> Self {
        Self {
            client,
            url: endpoint(base_url, MESSAGES_PATH),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl LlmProvider for SingleMessageProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let prompt = combine_prompts(system, user);
        let request_body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: [UserMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let request = self
            .client
            .post(&self.url)
            .header("x-api-key", self.api_key.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request_body);

        let body = send_once(PROVIDER_NAME, request).await?;

        let response: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::MalformedResponse {
                provider: PROVIDER_NAME,
                reason: e.to_string(),
            })?;

        if let Some(usage) = &response.usage {
            debug!(
                "Messages call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        response
            .into_text()
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyContent {
                provider: PROVIDER_NAME,
            })
    }
}
