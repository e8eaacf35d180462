//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
///
/// Every variant is fatal at start-up; once the chat loop runs, failures
/// are turned into reply text instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is invalid or missing required fields.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The LLM backend could not be constructed.
    #[error(transparent)]
    Runtime(#[from] runtime::Error),

    /// The tool service URL was rejected.
    #[error("tool service: {0}")]
    Mcp(#[from] mcp::Error),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
