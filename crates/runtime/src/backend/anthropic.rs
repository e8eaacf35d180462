//! Anthropic API backend.

use std::time::Duration;

use super::{DEFAULT_LLM_TIMEOUT, LlmBackend, check_status, network_error};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

/// Builder for creating an Anthropic backend.
#[derive(Debug, Clone)]
pub struct AnthropicBackendBuilder {
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
    timeout: Duration,
}

impl AnthropicBackendBuilder {
    /// Create a new builder with an API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: 4096,
            base_url: ANTHROPIC_API_BASE.to_string(),
            timeout: DEFAULT_LLM_TIMEOUT,
        }
    }

    /// Set the maximum tokens for responses.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the backend.
    pub fn build(self) -> Result<AnthropicBackend> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(AnthropicBackend {
            client,
            api_key: self.api_key,
            model: self.model,
            max_tokens: self.max_tokens,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Anthropic API backend.
pub struct AnthropicBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
}

impl AnthropicBackend {
    /// Create a builder for the Anthropic backend.
    pub fn builder(api_key: impl Into<String>, model: impl Into<String>) -> AnthropicBackendBuilder {
        AnthropicBackendBuilder::new(api_key, model)
    }
}

impl std::fmt::Display for AnthropicBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "anthropic({})", self.model)
    }
}

impl LlmBackend for AnthropicBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_request = ApiRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![ApiMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(model = %self.model, "sending anthropic request");
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("accept", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(network_error)?;

        let api_response: ApiResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        let content = api_response
            .content
            .iter()
            .filter(|b| b.block_type == "text")
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("");

        if content.is_empty() {
            let reason = api_response.stop_reason.as_deref().unwrap_or("unknown");
            return Err(Error::InvalidResponse(format!(
                "empty reply (stop reason: {reason})"
            )));
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{captured, spawn_provider};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn joins_text_blocks() {
        let (base, recorder) = spawn_provider(
            StatusCode::OK,
            json!({
                "content": [
                    {"type": "text", "text": "Bonjour"},
                    {"type": "text", "text": "!"}
                ],
                "usage": {"input_tokens": 3, "output_tokens": 2}
            }),
        )
        .await;

        let backend = AnthropicBackend::builder("sk-test", DEFAULT_ANTHROPIC_MODEL)
            .max_tokens(256)
            .base_url(base)
            .build()
            .unwrap();
        assert_eq!(backend.complete("hello").await.unwrap(), "Bonjour!");

        let request = captured(&recorder);
        assert_eq!(request.path, "/v1/messages");
        assert_eq!(request.headers["x-api-key"], "sk-test");
        assert_eq!(request.headers["anthropic-version"], "2023-06-01");
        assert_eq!(request.body["max_tokens"], 256);
        assert_eq!(
            request.body["messages"],
            json!([{"role": "user", "content": "hello"}])
        );
        assert!(request.body.get("system").is_none());
    }

    #[tokio::test]
    async fn error_status_becomes_api_error() {
        let (base, _) = spawn_provider(
            StatusCode::UNAUTHORIZED,
            json!({"type": "error", "error": {"type": "authentication_error"}}),
        )
        .await;

        let backend = AnthropicBackend::builder("bad", DEFAULT_ANTHROPIC_MODEL)
            .base_url(base)
            .build()
            .unwrap();
        let err = backend.complete("hello").await.unwrap_err();
        assert!(matches!(err, Error::Api(ref m) if m.contains("authentication_error")));
    }

    #[tokio::test]
    async fn reply_without_text_is_invalid_response() {
        let (base, _) = spawn_provider(
            StatusCode::OK,
            json!({"content": [], "stop_reason": "end_turn"}),
        )
        .await;

        let backend = AnthropicBackend::builder("k", DEFAULT_ANTHROPIC_MODEL)
            .base_url(base)
            .build()
            .unwrap();
        let err = backend.complete("hi").await.unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(ref m) if m.contains("end_turn")));
    }

    #[test]
    fn display_names_model() {
        let backend = AnthropicBackend::builder("k", "claude-test").build().unwrap();
        assert_eq!(backend.to_string(), "anthropic(claude-test)");
    }
}
