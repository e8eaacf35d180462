//! Roster runtime: keyword routing and LLM backends for the chat client.
//!
//! # Overview
//!
//! - **router**: decides whether a line of input is a tool request or plain
//!   text for the LLM.
//! - **LlmBackend**: a trait abstracting single-turn completion providers
//!   (Gemini, Anthropic).
//! - **Chatbot**: ties the two together and turns every failure into reply
//!   text.
//!
//! # Example
//!
//! ```ignore
//! use runtime::{Chatbot, GeminiBackend};
//! use mcp::McpClient;
//!
//! # async fn example() -> runtime::Result<()> {
//! let backend = GeminiBackend::builder("api-key", "gemini-2.0-flash").build()?;
//! let tools = McpClient::new("http://localhost:8000", mcp::DEFAULT_TIMEOUT).unwrap();
//!
//! let bot = Chatbot::new(backend, tools);
//! let turn = bot.respond("show me a random user").await;
//! println!("{}", turn.output);
//! # Ok(())
//! # }
//! ```

mod backend;
mod chat;
mod error;
pub mod router;

// LLM backend types
pub use backend::{
    AnthropicBackend, AnthropicBackendBuilder, DEFAULT_ANTHROPIC_MODEL, DEFAULT_GEMINI_MODEL,
    DEFAULT_LLM_TIMEOUT, GeminiBackend, GeminiBackendBuilder, LlmBackend, Provider, ProviderKind,
    ProviderSettings,
};

// Chat turn handling
pub use chat::{ChatTurn, Chatbot, ToolInvoker};

// Error types
pub use error::{Error, Result};

pub use router::{Route, ToolRequest, route};
