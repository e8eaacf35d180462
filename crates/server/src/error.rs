//! Tool service error types.

use mcp::catalog::{MAX_COUNT, MIN_COUNT};
use thiserror::Error;

use crate::config::ConfigError;

/// Why a tool call did not produce a profile listing.
///
/// The `Display` text is what callers see: every variant except
/// [`ToolError::NotFound`] is sent back as the tool's text content, so the
/// messages carry the `Error:` prefix themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The requested tool is not in the catalog (reported as HTTP 404).
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Error: Count must be between {} and {}", MIN_COUNT, MAX_COUNT)]
    CountOutOfRange(i64),

    #[error("Error: Count must be an integer")]
    CountNotInteger,

    #[error("Error: Gender parameter is required")]
    GenderRequired,

    #[error("Error: Gender must be 'male' or 'female'")]
    InvalidGender,

    /// The profile API could not be reached or answered with an error status.
    #[error("Error: Request failed - {0}")]
    Request(String),

    /// The profile API answered with something other than a result list.
    #[error("Error: Invalid response - {0}")]
    InvalidResponse(String),

    /// A profile record lacks one of the fields the formatter needs.
    #[error("Error: Missing data field - {0}")]
    MissingField(String),
}

/// Start-up errors of the tool service process.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid profile API url: {0}")]
    ProfileApiUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
