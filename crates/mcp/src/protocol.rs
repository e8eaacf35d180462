//! Wire types for the tool service's HTTP convention.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool definition returned by `GET /mcp/tools`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Body of `GET /mcp/tools`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListToolsResult {
    pub tools: Vec<Tool>,
}

/// Body of `POST /mcp/call_tool`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallToolParams {
    pub name: String,
    /// A missing or null `arguments` field means no arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Map<String, Value>>,
}

impl CallToolParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: None,
        }
    }

    pub fn with_arguments(mut self, arguments: Map<String, Value>) -> Self {
        self.arguments = Some(arguments);
        self
    }
}

/// Successful response of `POST /mcp/call_tool`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallToolResult {
    pub content: Vec<ToolContent>,
}

impl CallToolResult {
    /// A result holding a single text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
        }
    }

    /// Text of the first text block, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(ToolContent::as_text)
    }
}

/// Content returned by a tool.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolContent {
    /// Get text content if this is a text content block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ToolContent::Text { text } => Some(text),
        }
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Messages sent over `GET /mcp/sse`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SseMessage {
    ServerReady { server: String },
    Ping,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_text_result() {
        let result = CallToolResult::text("hello");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, json!({"content": [{"type": "text", "text": "hello"}]}));
    }

    #[test]
    fn deserialize_tool() {
        let json = r#"{
            "name": "get_random_user",
            "description": "Fetch a single random user profile.",
            "inputSchema": {"type": "object", "properties": {}}
        }"#;
        let tool: Tool = serde_json::from_str(json).unwrap();
        assert_eq!(tool.name, "get_random_user");
        assert_eq!(tool.input_schema["type"], "object");
    }

    #[test]
    fn call_params_accept_missing_and_null_arguments() {
        let missing: CallToolParams = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert!(missing.arguments.is_none());

        let null: CallToolParams =
            serde_json::from_str(r#"{"name":"x","arguments":null}"#).unwrap();
        assert!(null.arguments.is_none());
    }

    #[test]
    fn sse_messages_are_type_tagged() {
        let ready = SseMessage::ServerReady {
            server: "RandomUserServer".into(),
        };
        assert_eq!(
            serde_json::to_string(&ready).unwrap(),
            r#"{"type":"server_ready","server":"RandomUserServer"}"#
        );
        assert_eq!(
            serde_json::to_string(&SseMessage::Ping).unwrap(),
            r#"{"type":"ping"}"#
        );
    }
}
