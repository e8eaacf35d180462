//! One-turn chat: route a line, call the tool service or the LLM.

use std::future::Future;

use mcp::McpClient;

use crate::backend::LlmBackend;
use crate::router::{self, Route, ToolRequest};

/// Executes routed tool requests.
pub trait ToolInvoker: Send + Sync {
    fn invoke(&self, request: &ToolRequest) -> impl Future<Output = mcp::Result<String>> + Send;
}

impl ToolInvoker for McpClient {
    async fn invoke(&self, request: &ToolRequest) -> mcp::Result<String> {
        self.call_tool(request.name.as_str(), request.arguments.clone())
            .await
    }
}

/// One user input and the text produced for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub input: String,
    pub output: String,
}

/// Stateless chat front end.
///
/// Each call to [`Chatbot::respond`] is independent; nothing is remembered
/// between turns.
pub struct Chatbot<B, T> {
    backend: B,
    tools: T,
}

impl<B: LlmBackend, T: ToolInvoker> Chatbot<B, T> {
    pub fn new(backend: B, tools: T) -> Self {
        Self { backend, tools }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn tools(&self) -> &T {
        &self.tools
    }

    /// Produce the reply for one line. Failures become reply text.
    pub async fn respond(&self, input: &str) -> ChatTurn {
        let output = match router::route(input) {
            Route::Tool(request) => {
                tracing::info!(tool = %request.name, "routing to tool service");
                match self.tools.invoke(&request).await {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!(
                            tool = %request.name,
                            error = %e,
                            "tool service call failed"
                        );
                        format!("Error contacting MCP server: {e}")
                    }
                }
            }
            Route::Llm => match self.backend.complete(input).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(error = %e, "LLM call failed");
                    format!("Sorry, I encountered an error: {e}")
                }
            },
        };

        ChatTurn {
            input: input.to_string(),
            output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Result};
    use mcp::ToolName;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeLlm {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl LlmBackend for FakeLlm {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(Error::Network("connection reset".into()));
            }
            Ok(format!("echo: {prompt}"))
        }
    }

    #[derive(Default)]
    struct FakeTools {
        requests: Mutex<Vec<ToolRequest>>,
        fail: bool,
    }

    impl ToolInvoker for FakeTools {
        async fn invoke(&self, request: &ToolRequest) -> mcp::Result<String> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(mcp::Error::ToolNotFound("Tool not found: x".into()));
            }
            Ok(format!("ran {}", request.name))
        }
    }

    #[tokio::test]
    async fn plain_text_goes_to_llm_verbatim() {
        let bot = Chatbot::new(FakeLlm::default(), FakeTools::default());
        let turn = bot.respond("Tell me a Joke").await;

        assert_eq!(turn.input, "Tell me a Joke");
        assert_eq!(turn.output, "echo: Tell me a Joke");
        assert_eq!(*bot.backend().prompts.lock().unwrap(), ["Tell me a Joke"]);
        assert!(bot.tools().requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn trigger_phrase_goes_to_tools() {
        let bot = Chatbot::new(FakeLlm::default(), FakeTools::default());
        let turn = bot.respond("give me 3 random users").await;

        assert_eq!(turn.output, "ran get_multiple_users");
        let requests = bot.tools().requests.lock().unwrap();
        assert_eq!(requests[0].name, ToolName::GetMultipleUsers);
        assert_eq!(requests[0].arguments["count"], json!(3));
        assert!(bot.backend().prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn llm_failure_becomes_apology() {
        let llm = FakeLlm {
            fail: true,
            ..Default::default()
        };
        let bot = Chatbot::new(llm, FakeTools::default());
        let turn = bot.respond("hello").await;
        assert_eq!(
            turn.output,
            "Sorry, I encountered an error: network error: connection reset"
        );
    }

    #[tokio::test]
    async fn tool_failure_becomes_contact_error() {
        let tools = FakeTools {
            fail: true,
            ..Default::default()
        };
        let bot = Chatbot::new(FakeLlm::default(), tools);
        let turn = bot.respond("random user").await;
        assert_eq!(
            turn.output,
            "Error contacting MCP server: Tool not found: x"
        );
    }

    #[tokio::test]
    async fn unreachable_tool_service_becomes_contact_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = McpClient::new(&format!("http://{addr}"), mcp::DEFAULT_TIMEOUT).unwrap();
        let bot = Chatbot::new(FakeLlm::default(), client);
        let turn = bot.respond("show me a random user").await;
        assert!(turn.output.starts_with("Error contacting MCP server: "));
    }
}
