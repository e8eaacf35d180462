//! LLM backend abstraction.
//!
//! Provides a trait for single-turn text completion, allowing the chat
//! client to talk to different providers (Gemini, Anthropic) through one
//! interface.

mod anthropic;
mod gemini;

pub use anthropic::{AnthropicBackend, AnthropicBackendBuilder, DEFAULT_ANTHROPIC_MODEL};
pub use gemini::{DEFAULT_GEMINI_MODEL, GeminiBackend, GeminiBackendBuilder};

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

/// Default timeout for one completion call.
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(60);

/// Trait for LLM backends.
///
/// Every call is independent: no system prompt and no history are sent.
pub trait LlmBackend: Send + Sync {
    /// Send `prompt` as a single user message and return the reply text.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    Anthropic,
}

impl ProviderKind {
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => DEFAULT_GEMINI_MODEL,
            Self::Anthropic => DEFAULT_ANTHROPIC_MODEL,
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(Error::Config(format!(
                "unknown provider '{other}' (expected gemini or anthropic)"
            ))),
        }
    }
}

/// Everything needed to construct a backend.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub model: String,
    pub api_key: String,
    /// Override for the provider's API root (tests, proxies).
    pub base_url: Option<String>,
    pub timeout: Duration,
}

/// The configured backend.
pub enum Provider {
    Gemini(GeminiBackend),
    Anthropic(AnthropicBackend),
}

impl Provider {
    /// Build the backend described by `settings`.
    pub fn from_settings(settings: ProviderSettings) -> Result<Self> {
        match settings.kind {
            ProviderKind::Gemini => {
                let mut builder = GeminiBackend::builder(settings.api_key, settings.model)
                    .timeout(settings.timeout);
                if let Some(url) = settings.base_url {
                    builder = builder.base_url(url);
                }
                Ok(Self::Gemini(builder.build()?))
            }
            ProviderKind::Anthropic => {
                let mut builder = AnthropicBackend::builder(settings.api_key, settings.model)
                    .timeout(settings.timeout);
                if let Some(url) = settings.base_url {
                    builder = builder.base_url(url);
                }
                Ok(Self::Anthropic(builder.build()?))
            }
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini(backend) => backend.fmt(f),
            Self::Anthropic(backend) => backend.fmt(f),
        }
    }
}

impl LlmBackend for Provider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        match self {
            Self::Gemini(backend) => backend.complete(prompt).await,
            Self::Anthropic(backend) => backend.complete(prompt).await,
        }
    }
}

/// Map a failed send to [`Error::Network`], keeping timeouts recognisable.
fn network_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Network(format!("request timed out: {e}"))
    } else {
        Error::Network(e.to_string())
    }
}

/// Turn a non-2xx response into [`Error::Api`] with the provider's body.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(Error::Api(format!("{status}: {body}")))
}
