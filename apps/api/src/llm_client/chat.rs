//! Chat-style provider — OpenAI Chat Completions and compatible endpoints.
//!
//! System and user prompts travel as separate role-tagged messages.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{endpoint, send_once, ApiKey, LlmError, LlmProvider};

pub const PROVIDER_NAME: &str = "openai";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const MAX_TOKENS: u32 = 1000;
/// Creative copy benefits from a little extra variability.
const TEMPERATURE: f64 = 0.85;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Chat Completions client authenticated with a bearer token.
#[derive(Clone)]
pub struct ChatProvider {
    client: Client,
    url: String,
    api_key: ApiKey,
    model: String,
}

impl ChatProvider {
    pub fn new(client: Client, base_url: &str, api_key: ApiKey, model: String) -> Self {
        Self {
            client,
            url: endpoint(base_url, CHAT_COMPLETIONS_PATH),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl LlmProvider for ChatProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let request = self
            .client
            .post(&self.url)
            .bearer_auth(self.api_key.expose())
            .json(&request_body);

        let body = send_once(PROVIDER_NAME, request).await?;

        let response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::MalformedResponse {
                provider: PROVIDER_NAME,
                reason: e.to_string(),
            })?;

        if let Some(usage) = &response.usage {
            debug!(
                "Chat completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyContent {
                provider: PROVIDER_NAME,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn provider_for(server: &mockito::Server) -> ChatProvider {
        ChatProvider::new(
            Client::new(),
            &server.url(),
            ApiKey::new("sk-test-key"),
            DEFAULT_MODEL.to_string(),
        )
    }

    #[tokio::test]
    async fn test_generate_sends_role_tagged_messages() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", CHAT_COMPLETIONS_PATH)
            .match_header("authorization", "Bearer sk-test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "max_tokens": 1000,
                "messages": [
                    { "role": "system", "content": "You are a copywriter." },
                    { "role": "user", "content": "Write about watches." }
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"Timeless. #watches"}}],
                    "usage":{"prompt_tokens":12,"completion_tokens":4}}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let text = provider_for(&server)
            .generate("You are a copywriter.", "Write about watches.")
            .await
            .unwrap();

        assert_eq!(text, "Timeless. #watches");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_sends_temperature() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", CHAT_COMPLETIONS_PATH)
            .match_body(Matcher::Regex(r#""temperature":0\.85"#.to_string()))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"ok"}}]}"#)
            .expect(1)
            .create_async()
            .await;

        provider_for(&server).generate("s", "u").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error_without_retry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", CHAT_COMPLETIONS_PATH)
            .with_status(503)
            .with_body(r#"{"error":{"message":"overloaded"}}"#)
            .expect(1)
            .create_async()
            .await;

        let err = provider_for(&server).generate("s", "u").await.unwrap_err();

        match err {
            LlmError::Api {
                provider,
                status,
                body,
            } => {
                assert_eq!(provider, PROVIDER_NAME);
                assert_eq!(status, 503);
                assert_eq!(body, r#"{"error":{"message":"overloaded"}}"#);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        // Exactly one request: no retry on 5xx.
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", CHAT_COMPLETIONS_PATH)
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let err = provider_for(&server).generate("s", "u").await.unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_no_choices_is_empty_content() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", CHAT_COMPLETIONS_PATH)
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = provider_for(&server).generate("s", "u").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let provider = ChatProvider::new(
            Client::new(),
            "http://127.0.0.1:1",
            ApiKey::new("sk-test-key"),
            DEFAULT_MODEL.to_string(),
        );

        let err = provider.generate("s", "u").await.unwrap_err();
        assert!(matches!(err, LlmError::Transport { .. }));
        assert_eq!(err.status(), None);
    }
}
