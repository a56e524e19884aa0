//! Plain request/response HTTP transport (spec.md §4.6 "Plain HTTP").
//!
//! One POST carries one JSON-RPC request; the response body is the JSON-RPC
//! response. Unsupported media returns 415; a body that isn't JSON at all
//! returns 400 with a `-32700` envelope, a body that's valid JSON but not a
//! valid envelope (e.g. missing `method`) returns 400 with `-32600`; logical
//! (engine) errors are still transport success — HTTP 200 with a JSON-RPC
//! error body, per JSON-RPC convention.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use mcp_core::Context;
use mcp_protocol::{JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse};
use mcp_server::Engine;
use serde_json::Value;

use crate::error::TransportResult;

const DEFAULT_MCP_PATH: &str = "/mcp";

#[derive(Clone)]
struct HttpState {
    engine: Arc<Engine>,
}

/// Build the axum router serving plain request/response MCP over HTTP at
/// `path` (default `/mcp`).
#[must_use]
pub fn router(engine: Arc<Engine>, path: Option<&str>) -> Router {
    let state = HttpState { engine };
    Router::new().route(path.unwrap_or(DEFAULT_MCP_PATH), post(handle_post)).with_state(state)
}

/// Bind and serve the plain HTTP transport until the process is killed.
pub async fn serve(engine: Arc<Engine>, addr: &str, path: Option<&str>) -> TransportResult<()> {
    let app = router(engine, path);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| crate::error::TransportError::StartupFailed(e.to_string()))?;
    tracing::info!(addr, "plain HTTP transport listening");
    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::TransportError::StartupFailed(e.to_string()))?;
    Ok(())
}

fn client_id_from_headers(headers: &HeaderMap) -> String {
    headers
        .get("x-client-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("http-{}", uuid::Uuid::new_v4()))
}

async fn handle_post(
    State(state): State<HttpState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> impl IntoResponse {
    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !content_type.is_empty() && !content_type.starts_with("application/json") {
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, Json(Value::Null)).into_response();
    }

    let request: JsonRpcRequest = match mcp_protocol::parse_request(&body) {
        Ok(r) => r,
        Err(err) => {
            let error = JsonRpcErrorResponse::from_mcp_error(Value::Null, &err);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    let client_id = client_id_from_headers(&headers);
    let ctx = Context::new(client_id, request.id.clone());

    match state.engine.process_request(&request, &ctx).await {
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
    async fn unsupported_media_type_returns_415() {
        let app = router(make_engine(), None);
        let response = app
            .oneshot(
                Request::post("/mcp")
                    .header("content-type", "text/plain")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn malformed_body_returns_400_with_parse_error() {
        let app = router(make_engine(), None);
        let response = app
            .oneshot(
                Request::post("/mcp")
                    .header("content-type", "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_method_returns_400_with_invalid_request_error() {
        let app = router(make_engine(), None);
        let body = serde_json::json!({"jsonrpc":"2.0","id":1});
        let response = app
            .oneshot(
                Request::post("/mcp")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["error"]["code"], serde_json::json!(-32600));
    }

    #[tokio::test]
    async fn engine_error_is_200_with_jsonrpc_error_body() {
        let app = router(make_engine(), None);
        let body = serde_json::json!({"jsonrpc":"2.0","id":1,"method":"tools/list"});
        let response = app
            .oneshot(
                Request::post("/mcp")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["error"]["code"], serde_json::json!(-32002));
    }
}
