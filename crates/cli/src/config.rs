//! Configuration loading from roster.toml and the environment.

use runtime::{ProviderKind, ProviderSettings};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "roster.toml";

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "ROSTER_CONFIG";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// LLM provider configuration.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Tool service connection.
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// LLM provider configuration.
#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    /// Provider name ("gemini" or "anthropic").
    #[serde(default)]
    pub provider: ProviderKind,

    /// Model to use; defaults per provider.
    pub model: Option<String>,

    /// API key. Usually left out of the file and taken from
    /// GEMINI_API_KEY / ANTHROPIC_API_KEY instead.
    pub api_key: Option<String>,

    /// Override for the provider's API root.
    pub base_url: Option<String>,

    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: None,
            api_key: None,
            base_url: None,
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

/// Where the tool service lives.
#[derive(Debug, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_tools_url")]
    pub url: String,

    #[serde(default = "default_tools_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            url: default_tools_url(),
            timeout_secs: default_tools_timeout_secs(),
        }
    }
}

fn default_llm_timeout_secs() -> u64 {
    60
}

fn default_tools_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_tools_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load the given file, or `roster.toml` if present, or fall back to
    /// defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load(CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Apply environment overrides. `var` looks up one variable; empty
    /// values count as unset.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let var = |name: &str| var(name).filter(|value| !value.is_empty());

        if let Some(provider) = var("ROSTER_PROVIDER") {
            self.llm.provider = provider
                .parse()
                .map_err(|_| ConfigError::InvalidProvider(provider))?;
        }
        if let Some(model) = var("ROSTER_MODEL") {
            self.llm.model = Some(model);
        }
        if let Some(key) = var(self.llm.provider.api_key_var()) {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = var("ROSTER_TOOL_URL") {
            self.tools.url = url;
        }
        Ok(())
    }

    /// Model name, falling back to the provider's default.
    pub fn model(&self) -> &str {
        self.llm
            .model
            .as_deref()
            .unwrap_or_else(|| self.llm.provider.default_model())
    }

    /// Build the backend settings.
    ///
    /// Requires an API key for the selected provider.
    pub fn provider_settings(&self) -> Result<ProviderSettings, ConfigError> {
        let api_key = self
            .llm
            .api_key
            .clone()
            .ok_or(ConfigError::MissingApiKey {
                provider: self.llm.provider,
                var: self.llm.provider.api_key_var(),
            })?;

        Ok(ProviderSettings {
            kind: self.llm.provider,
            model: self.model().to_string(),
            api_key,
            base_url: self.llm.base_url.clone(),
            timeout: Duration::from_secs(self.llm.timeout_secs),
        })
    }

    pub fn tools_timeout(&self) -> Duration {
        Duration::from_secs(self.tools.timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("unknown provider '{0}' (expected gemini or anthropic)")]
    InvalidProvider(String),

    #[error("{provider} API key not configured: set {var} or llm.api_key")]
    MissingApiKey {
        provider: ProviderKind,
        var: &'static str,
    },
}
