//! Configuration loading from roster.toml.

use serde::Deserialize;
use std::path::Path;

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILE: &str = "roster.toml";

/// Top-level configuration.
///
/// The file is shared with the chat client; sections this process does not
/// know about are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Listen address.
    #[serde(default)]
    pub server: ListenConfig,

    /// Upstream profile API.
    #[serde(default)]
    pub profile_api: ProfileApiConfig,
}

/// Where the HTTP service listens.
#[derive(Debug, Deserialize)]
pub struct ListenConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings for the external profile API.
#[derive(Debug, Deserialize)]
pub struct ProfileApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for one upstream request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Verify the upstream TLS certificate.
    /// Only disable this for environments with intercepting proxies.
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
}

impl Default for ProfileApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            verify_tls: default_verify_tls(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_base_url() -> String {
    "https://randomuser.me/api/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_verify_tls() -> bool {
    true
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
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}
