//! Server-Sent Events transport (spec.md §4.6 "SSE").
//!
//! A client opens `GET` on the SSE path; the server replies
//! `text/event-stream`, sends a `connected` event carrying `{client_id}`,
//! then streams subsequent `message` events. Requests flow the other
//! direction: the client `POST`s JSON-RPC envelopes to a sibling path,
//! identifying itself with the `x-client-id` header it got from `connected`;
//! responses and server-initiated notifications are written back over the
//! open SSE channel, never in the POST response body.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::stream::{self, Stream, StreamExt};
use mcp_core::connection::BoxFuture;
use mcp_core::{Context, McpError, OutboundChannel};
use mcp_protocol::{JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse};
use mcp_server::Engine;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::client_table::ClientTable;
use crate::error::TransportResult;

const DEFAULT_SSE_PATH: &str = "/sse";
const DEFAULT_MESSAGES_PATH: &str = "/sse/messages";

struct SseChannel {
    sender: mpsc::UnboundedSender<Value>,
}

impl std::fmt::Debug for SseChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SseChannel").finish()
    }
}

impl OutboundChannel for SseChannel {
    fn send(&self, message: Value) -> BoxFuture<'_, mcp_core::McpResult<()>> {
        let result = self
            .sender
            .send(message)
            .map_err(|_| McpError::internal("sse client disconnected"));
        Box::pin(async move { result })
    }

    fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[derive(Clone)]
struct SseState {
    engine: Arc<Engine>,
    clients: Arc<ClientTable>,
}

/// Build the router serving the SSE GET path and its sibling POST path.
#[must_use]
pub fn router(engine: Arc<Engine>, sse_path: Option<&str>, messages_path: Option<&str>) -> Router {
    let state = SseState {
        engine,
        clients: Arc::new(ClientTable::new()),
    };
    Router::new()
        .route(sse_path.unwrap_or(DEFAULT_SSE_PATH), get(handle_connect))
        .route(messages_path.unwrap_or(DEFAULT_MESSAGES_PATH), post(handle_message))
        .with_state(state)
}

pub async fn serve(
    engine: Arc<Engine>,
    addr: &str,
    sse_path: Option<&str>,
    messages_path: Option<&str>,
) -> TransportResult<()> {
    let app = router(engine, sse_path, messages_path);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| crate::error::TransportError::StartupFailed(e.to_string()))?;
    tracing::info!(addr, "SSE transport listening");
    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::TransportError::StartupFailed(e.to_string()))?;
    Ok(())
}

async fn handle_connect(
    State(state): State<SseState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let client_id = format!("sse-{}", uuid::Uuid::new_v4());
    let (tx, rx) = mpsc::unbounded_channel::<Value>();
    state.clients.insert(client_id.clone(), Arc::new(SseChannel { sender: tx }));

    let connected = stream::once(async move {
        Ok(Event::default()
            .event("connected")
            .data(json!({"client_id": client_id}).to_string()))
    });

    let messages = tokio_stream::wrappers::UnboundedReceiverStream::new(rx).map(|value| {
        Ok(Event::default().event("message").data(value.to_string()))
    });

    Sse::new(connected.chain(messages)).keep_alive(KeepAlive::default())
}

async fn handle_message(
    State(state): State<SseState>,
    headers: HeaderMap,
    Json(raw): Json<Value>,
) -> impl IntoResponse {
    let Some(client_id) = headers.get("x-client-id").and_then(|v| v.to_str().ok()) else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "missing x-client-id header"})))
            .into_response();
    };

    let Some(channel) = state.clients.get(client_id) else {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "unknown client_id"}))).into_response();
    };

    let request: JsonRpcRequest = match mcp_protocol::request_from_value(raw) {
        Ok(r) => r,
        Err(err) => {
            let error = JsonRpcErrorResponse::from_mcp_error(Value::Null, &err);
            let _ = channel.send(serde_json::to_value(&error).unwrap_or(Value::Null)).await;
            return StatusCode::ACCEPTED.into_response();
        }
    };

    let ctx = Context::new(client_id, request.id.clone()).with_connection_handle(channel.clone());

    match state.engine.process_request(&request, &ctx).await {
        Ok(Some(result)) => {
            let response = JsonRpcResponse::new(request.id.clone().unwrap_or(Value::Null), result);
            let _ = channel.send(serde_json::to_value(&response).unwrap_or(Value::Null)).await;
        }
        Ok(None) => {}
        Err(err) => {
            let response =
                JsonRpcErrorResponse::from_mcp_error(request.id.clone().unwrap_or(Value::Null), &err);
            let _ = channel.send(serde_json::to_value(&response).unwrap_or(Value::Null)).await;
        }
    }

    StatusCode::ACCEPTED.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use mcp_registry::Registry;
    use tower::ServiceExt;

    fn make_engine() -> Arc<Engine> {
        Arc::new(Engine::new(mcp_server::ServerConfig::new("t", "0.1.0"), Arc::new(Registry::new())))
    }

    #[tokio::test]
    async fn message_to_unknown_client_is_404() {
        let app = router(make_engine(), None, None);
        let response = app
            .oneshot(
                Request::post(DEFAULT_MESSAGES_PATH)
                    .header("x-client-id", "ghost")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn message_missing_method_sends_invalid_request_over_the_sse_channel() {
        use mcp_core::connection::test_support::RecordingChannel;

        let clients = Arc::new(ClientTable::new());
        let channel = Arc::new(RecordingChannel::new());
        clients.insert("known-client", channel.clone());
        let state = SseState { engine: make_engine(), clients };
        let app = Router::new()
            .route(DEFAULT_MESSAGES_PATH, post(handle_message))
            .with_state(state);

        let response = app
            .oneshot(
                Request::post(DEFAULT_MESSAGES_PATH)
                    .header("x-client-id", "known-client")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::json!({"jsonrpc":"2.0","id":1}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(channel.messages()[0]["error"]["code"], json!(-32600));
    }

    #[tokio::test]
    async fn message_without_client_id_header_is_400() {
        let app = router(make_engine(), None, None);
        let response = app
            .oneshot(
                Request::post(DEFAULT_MESSAGES_PATH)
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
