//! HTTP routes of the tool service.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, Sse},
    },
    routing::{get, post},
};
use mcp::{CallToolParams, CallToolResult, ErrorDetail, ListToolsResult, SseMessage};
use serde::Serialize;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::{Stream, StreamExt};

use crate::error::ToolError;
use crate::profile::ProfileSource;
use crate::tools::ToolService;

/// Name announced in the first SSE event.
pub const SERVER_NAME: &str = "RandomUserServer";

/// Gap between keep-alive pings on `/mcp/sse`.
pub const PING_INTERVAL: Duration = Duration::from_secs(1);

/// Build the router with the tool service as shared state.
pub fn router<S: ProfileSource + 'static>(service: ToolService<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/mcp/tools", get(list_tools::<S>))
        .route("/mcp/call_tool", post(call_tool::<S>))
        .route("/mcp/sse", get(sse))
        .with_state(Arc::new(service))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_tools<S: ProfileSource + 'static>(
    State(service): State<Arc<ToolService<S>>>,
) -> Json<ListToolsResult> {
    Json(ListToolsResult {
        tools: service.tools(),
    })
}

async fn call_tool<S: ProfileSource + 'static>(
    State(service): State<Arc<ToolService<S>>>,
    Json(params): Json<CallToolParams>,
) -> Response {
    let arguments = params.arguments.unwrap_or_default();

    match service.call(&params.name, &arguments).await {
        Ok(text) => {
            tracing::info!(tool = %params.name, "tool call succeeded");
            Json(CallToolResult::text(text)).into_response()
        }
        Err(err @ ToolError::NotFound(_)) => {
            tracing::warn!(tool = %params.name, "unknown tool requested");
            (
                StatusCode::NOT_FOUND,
                Json(ErrorDetail {
                    detail: err.to_string(),
                }),
            )
                .into_response()
        }
        Err(err) => {
            // Reported in-band; the transport call itself succeeded.
            tracing::warn!(tool = %params.name, error = %err, "tool call failed");
            Json(CallToolResult::text(err.to_string())).into_response()
        }
    }
}

async fn sse() -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    tracing::debug!("sse client connected");
    Sse::new(keep_alive(PING_INTERVAL).map(|message| Event::default().json_data(message)))
}

/// `server_ready` followed by a `ping` every `period`.
///
/// The stream owns its timer, so dropping it when the client disconnects
/// stops the pings.
pub fn keep_alive(period: Duration) -> impl Stream<Item = SseMessage> {
    let ready = tokio_stream::once(SseMessage::ServerReady {
        server: SERVER_NAME.to_string(),
    });

    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let pings = IntervalStream::new(interval).map(|_| SseMessage::Ping);

    ready.chain(pings)
}
