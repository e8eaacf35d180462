//! Google Gemini backend.

use std::time::Duration;

use super::{DEFAULT_LLM_TIMEOUT, LlmBackend, check_status, network_error};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct ApiContent<'a> {
    role: &'static str,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Builder for creating a Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiBackendBuilder {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiBackendBuilder {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_API_BASE.to_string(),
            timeout: DEFAULT_LLM_TIMEOUT,
        }
    }

    /// Point the backend at a different API root.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<GeminiBackend> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(GeminiBackend {
            client,
            api_key: self.api_key,
            model: self.model,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Gemini `generateContent` backend.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn builder(api_key: impl Into<String>, model: impl Into<String>) -> GeminiBackendBuilder {
        GeminiBackendBuilder::new(api_key, model)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl std::fmt::Display for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gemini({})", self.model)
    }
}

impl LlmBackend for GeminiBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ApiRequest {
            contents: vec![ApiContent {
                role: "user",
                parts: vec![ApiPart { text: prompt }],
            }],
        };

        tracing::debug!(model = %self.model, "sending gemini request");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(network_error)?;

        let api_response: ApiResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        let candidate = api_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("no candidates in response".into()))?;

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            return Err(Error::InvalidResponse(format!(
                "empty reply (finish reason: {reason})"
            )));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{captured, spawn_provider};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn sends_single_user_turn() {
        let (base, recorder) = spawn_provider(
            StatusCode::OK,
            json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Hello"}, {"text": " there"}]},
                    "finishReason": "STOP"
                }]
            }),
        )
        .await;

        let backend = GeminiBackend::builder("test-key", "gemini-2.0-flash")
            .base_url(format!("{base}/"))
            .build()
            .unwrap();
        let reply = backend.complete("hi").await.unwrap();
        assert_eq!(reply, "Hello there");

        let request = captured(&recorder);
        assert_eq!(
            request.path,
            "/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(request.headers["x-goog-api-key"], "test-key");
        assert_eq!(
            request.body,
            json!({"contents": [{"role": "user", "parts": [{"text": "hi"}]}]})
        );
    }

    #[tokio::test]
    async fn error_status_becomes_api_error() {
        let (base, _) = spawn_provider(
            StatusCode::BAD_REQUEST,
            json!({"error": {"message": "API key not valid"}}),
        )
        .await;

        let backend = GeminiBackend::builder("bad", "gemini-2.0-flash")
            .base_url(base)
            .build()
            .unwrap();
        let err = backend.complete("hi").await.unwrap_err();
        match err {
            Error::Api(message) => {
                assert!(message.starts_with("400"));
                assert!(message.contains("API key not valid"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blocked_prompt_is_invalid_response() {
        let (base, _) = spawn_provider(
            StatusCode::OK,
            json!({"candidates": [{"finishReason": "SAFETY"}]}),
        )
        .await;

        let backend = GeminiBackend::builder("k", "gemini-2.0-flash")
            .base_url(base)
            .build()
            .unwrap();
        let err = backend.complete("hi").await.unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn unreachable_provider_is_network_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = GeminiBackend::builder("k", "gemini-2.0-flash")
            .base_url(format!("http://{addr}"))
            .build()
            .unwrap();
        assert!(matches!(
            backend.complete("hi").await,
            Err(Error::Network(_))
        ));
    }
}
