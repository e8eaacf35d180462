//! HTTP client for the tool service.

use std::time::Duration;

use reqwest::{Response, StatusCode, Url};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::protocol::{CallToolParams, CallToolResult, ErrorDetail, ListToolsResult, Tool};

/// Default timeout for tool service calls.
///
/// Covers the service's own upstream timeout plus some margin.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Handle to a running tool service.
#[derive(Debug, Clone)]
pub struct McpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl McpClient {
    /// Create a client for the service rooted at `base_url`
    /// (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut url =
            Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!("{base_url}: expected http or https")));
        }

        // Endpoints are joined relative to the base, which needs a trailing slash.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// List the tools the service exposes.
    pub async fn list_tools(&self) -> Result<Vec<Tool>> {
        let response = self.http.get(self.endpoint("mcp/tools")?).send().await?;
        let result: ListToolsResult = check_status(response).await?.json().await?;
        Ok(result.tools)
    }

    /// Call a tool by name and return the text it produced.
    pub async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> Result<String> {
        let params = CallToolParams::new(name).with_arguments(arguments);
        tracing::debug!(tool = name, "calling tool service");

        let response = self
            .http
            .post(self.endpoint("mcp/call_tool")?)
            .json(&params)
            .send()
            .await?;

        let result: CallToolResult = check_status(response).await?.json().await?;
        result
            .first_text()
            .map(str::to_owned)
            .ok_or_else(|| Error::InvalidResponse("no text content in tool result".into()))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::NOT_FOUND {
        if let Ok(ErrorDetail { detail }) = serde_json::from_str(&body) {
            return Err(Error::ToolNotFound(detail));
        }
    }
    Err(Error::Status { status, body })
}
