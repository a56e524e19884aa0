//! Chunked NDJSON streaming HTTP transport (spec.md §4.6 "NDJSON streaming
//! HTTP").
//!
//! One POST opens a chunked `application/x-ndjson` response. Negotiated via
//! the request's `Accept` header: only when it includes
//! `application/x-ndjson` does the transport take the streaming path;
//! otherwise it falls through to single-response HTTP mode. On stream open
//! the server writes one JSON-RPC object per line: first a
//! `streaming_started` status, then zero or more `progress` notifications,
//! then one terminal object (`status:"complete"` or an error).

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use futures::StreamExt;
use mcp_core::connection::BoxFuture;
use mcp_core::{Context, McpError, OutboundChannel};
use mcp_protocol::{JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse};
use mcp_server::Engine;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::error::TransportResult;

const DEFAULT_NDJSON_PATH: &str = "/mcp/stream";

struct NdjsonChannel {
    sender: mpsc::UnboundedSender<Value>,
}

impl std::fmt::Debug for NdjsonChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NdjsonChannel").finish()
    }
}

impl OutboundChannel for NdjsonChannel {
    fn send(&self, message: Value) -> BoxFuture<'_, mcp_core::McpResult<()>> {
        let result = self
            .sender
            .send(message)
            .map_err(|_| McpError::internal("ndjson client disconnected"));
        Box::pin(async move { result })
    }

    fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[derive(Clone)]
struct NdjsonState {
    engine: Arc<Engine>,
}

#[must_use]
pub fn router(engine: Arc<Engine>, path: Option<&str>) -> Router {
    let state = NdjsonState { engine };
    Router::new().route(path.unwrap_or(DEFAULT_NDJSON_PATH), post(handle_post)).with_state(state)
}

pub async fn serve(engine: Arc<Engine>, addr: &str, path: Option<&str>) -> TransportResult<()> {
    let app = router(engine, path);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| crate::error::TransportError::StartupFailed(e.to_string()))?;
    tracing::info!(addr, "NDJSON transport listening");
    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::TransportError::StartupFailed(e.to_string()))?;
    Ok(())
}

fn accepts_ndjson(headers: &HeaderMap) -> bool {
    headers
        .get(axum::http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/x-ndjson"))
}

async fn handle_post(
    State(state): State<NdjsonState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> impl IntoResponse {
    let request: JsonRpcRequest = match mcp_protocol::parse_request(&body) {
        Ok(r) => r,
        Err(err) => {
            let error = JsonRpcErrorResponse::from_mcp_error(Value::Null, &err);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    if !accepts_ndjson(&headers) {
        return single_response(&state, &request).await.into_response();
    }

    let client_id = format!("ndjson-{}", uuid::Uuid::new_v4());
    let request_id = request.id.clone().unwrap_or(Value::Null);
    let (tx, rx) = mpsc::unbounded_channel::<Value>();
    let channel: Arc<dyn OutboundChannel> = Arc::new(NdjsonChannel { sender: tx });

    let _ = channel
        .send(json!({
            "jsonrpc": mcp_protocol::JSONRPC_VERSION,
            "id": request_id,
            "result": {"status": "streaming_started"},
        }))
        .await;

    let ctx = Context::new(client_id, request.id.clone())
        .with_streaming(true)
        .with_connection_handle(channel.clone());

    match state.engine.process_request(&request, &ctx).await {
        Ok(Some(value)) if value == json!({"status": "streaming"}) => {
            // The engine spawned the background task that owns its own
            // clone of `ctx` (and therefore `channel`); it writes progress
            // and the terminal message itself. Nothing more to do here.
        }
        Ok(Some(value)) => {
            let _ = channel
                .send(json!({
                    "jsonrpc": mcp_protocol::JSONRPC_VERSION,
                    "id": request_id,
                    "result": {"status": "complete", "data": value},
                }))
                .await;
        }
        Ok(None) => {}
        Err(err) => {
            let response = JsonRpcErrorResponse::from_mcp_error(request_id, &err);
            let _ = channel.send(serde_json::to_value(&response).unwrap_or(Value::Null)).await;
        }
    }
    drop(channel);

    let stream = UnboundedReceiverStream::new(rx).map(|value| {
        let mut line = serde_json::to_vec(&value).unwrap_or_default();
        line.push(b'\n');
        Ok::<_, Infallible>(line)
    });

    axum::response::Response::builder()
        .status(StatusCode::OK)
        .header(axum::http::header::CONTENT_TYPE, "application/x-ndjson")
        .header(axum::http::header::CONNECTION, "keep-alive")
        .body(Body::from_stream(stream))
        .unwrap()
        .into_response()
}

async fn single_response(state: &NdjsonState, request: &JsonRpcRequest) -> impl IntoResponse {
    let ctx = Context::new(format!("http-{}", uuid::Uuid::new_v4()), request.id.clone());
    match state.engine.process_request(request, &ctx).await {
        Ok(Some(result)) => {
            let response = JsonRpcResponse::new(request.id.clone().unwrap_or(Value::Null), result);
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => (StatusCode::NO_CONTENT, Json(Value::Null)).into_response(),
        Err(err) => {
            let response =
                JsonRpcErrorResponse::from_mcp_error(request.id.clone().unwrap_or(Value::Null), &err);
            (StatusCode::OK, Json(response)).into_response()
        }
    }
}
