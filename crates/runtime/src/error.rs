use thiserror::Error;

/// Failures of one LLM completion.
///
/// The chat loop never propagates these; [`crate::Chatbot`] renders them as
/// reply text.
#[derive(Debug, Error)]
pub enum Error {
    /// The backend could not be constructed (bad provider name, HTTP client).
    #[error("config error: {0}")]
    Config(String),

    /// Transport failure or timeout talking to the provider.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status (`"<status>: <body>"`).
    #[error("API error: {0}")]
    Api(String),

    /// The reply could not be parsed or carried no text.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
