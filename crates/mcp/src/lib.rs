//! Tool service protocol and HTTP client.
//!
//! The tool service speaks a simplified request/response convention over
//! HTTP: `GET /mcp/tools` lists the catalog, `POST /mcp/call_tool` invokes a
//! tool and `GET /mcp/sse` is a keep-alive event stream. This crate holds the
//! wire types for both sides plus the client the chat loop uses.
//!
//! # Example
//!
//! ```no_run
//! use mcp::{McpClient, DEFAULT_TIMEOUT};
//!
//! # async fn example() -> mcp::Result<()> {
//! let client = McpClient::new("http://localhost:8000", DEFAULT_TIMEOUT)?;
//!
//! for tool in client.list_tools().await? {
//!     println!("Tool: {}", tool.name);
//! }
//!
//! let mut arguments = serde_json::Map::new();
//! arguments.insert("count".into(), 3.into());
//! let text = client.call_tool("get_multiple_users", arguments).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
mod client;
mod error;
mod protocol;

pub use catalog::{Gender, ToolName, UnknownName};
pub use client::{DEFAULT_TIMEOUT, McpClient};
pub use error::{Error, Result};
pub use protocol::{
    CallToolParams, CallToolResult, ErrorDetail, ListToolsResult, SseMessage, Tool, ToolContent,
};
