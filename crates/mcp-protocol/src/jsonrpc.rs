//! JSON-RPC 2.0 envelope types (spec.md §6).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The fixed JSON-RPC version string.
pub const JSONRPC_VERSION: &str = "2.0";

/// The MCP protocol version this engine negotiates (spec.md §6).
pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// An inbound JSON-RPC envelope as received from a transport.
///
/// `id` is `None` for notifications. Per spec.md §9's "Request-id
/// fabrication" design note, the engine never synthesizes one — an
/// id-less message is dispatched for side effects but produces no response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JsonRpcRequest {
    /// Always `"2.0"`; deserialization does not reject other values, the
    /// way the teacher's `JsonRpcVersion` type does, because transports in
    /// this engine are expected to trust their own framing rather than
    /// re-validate protocol boilerplate per message.
    pub jsonrpc: String,
    /// The method name, bare or `mcp/`-prefixed (spec.md §4.4).
    pub method: String,
    /// Method parameters, if any.
    #[serde(default)]
    pub params: Option<Value>,
    /// Request id; absent for notifications.
    #[serde(default)]
    pub id: Option<Value>,
}

impl JsonRpcRequest {
    /// Strip a leading `mcp/` prefix so dispatch can match bare method names.
    #[must_use]
    pub fn bare_method(&self) -> &str {
        self.method.strip_prefix("mcp/").unwrap_or(&self.method)
    }

    /// `true` if this envelope has no `id` (a notification, not a request).
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Parse raw bytes into a [`JsonRpcRequest`], distinguishing a true syntax
/// error from a syntactically valid JSON value that doesn't satisfy the
/// envelope shape (spec.md §7's "Malformed envelope" vs. "Invalid request"
/// rows — `-32700` for the former, `-32600` for the latter, e.g. a value
/// missing the required `method` field).
///
/// # Errors
/// Returns `ErrorKind::ParseError` if `bytes` is not valid JSON, or
/// `ErrorKind::InvalidRequest` if it parses but isn't a valid envelope.
pub fn parse_request(bytes: &[u8]) -> Result<JsonRpcRequest, mcp_core::McpError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| mcp_core::McpError::parse_error(format!("Parse error: {e}")))?;
    request_from_value(value)
}

/// As [`parse_request`], but starting from a [`Value`] a transport has
/// already deserialized itself (e.g. via an axum `Json` extractor) — still
/// needs the parse/invalid-request distinction for a value that is valid
/// JSON but not a valid envelope.
///
/// # Errors
/// Returns `ErrorKind::InvalidRequest` if `value` isn't a valid envelope.
pub fn request_from_value(value: Value) -> Result<JsonRpcRequest, mcp_core::McpError> {
    serde_json::from_value(value)
        .map_err(|e| mcp_core::McpError::invalid_request(format!("Invalid request: {e}")))
}

/// A successful JSON-RPC response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    pub result: Value,
}

impl JsonRpcResponse {
    #[must_use]
    pub fn new(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
        }
    }
}

/// A JSON-RPC error object (spec.md §6/§7).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonRpcErrorObject {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A JSON-RPC error response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: String,
    pub id: Value,
    pub error: JsonRpcErrorObject,
}

impl JsonRpcErrorResponse {
    #[must_use]
    pub fn new(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcErrorObject {
                code,
                message: message.into(),
                data: None,
            },
        }
    }

    #[must_use]
    pub fn from_mcp_error(id: Value, err: &mcp_core::McpError) -> Self {
        Self::new(id, err.kind.code(), err.message.clone())
    }
}

/// A server-to-client notification — no `id`, no response expected.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

impl JsonRpcNotification {
    #[must_use]
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }

    /// The `{jsonrpc, method: "progress", params}` notification emitted
    /// during a streaming tool invocation (spec.md §4.4 step 2).
    #[must_use]
    pub fn progress(params: Value) -> Self {
        Self::new("progress", params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_method_strips_mcp_prefix() {
        let req: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc":"2.0","id":"1","method":"mcp/tools/list"}))
                .unwrap();
        assert_eq!(req.bare_method(), "tools/list");
    }

    #[test]
    fn missing_id_is_notification() {
        let req: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc":"2.0","method":"tools/list"})).unwrap();
        assert!(req.is_notification());
    }

    #[test]
    fn error_response_serializes_without_data_field() {
        let resp = JsonRpcErrorResponse::new(json!("1"), -32601, "Method not found: foo");
        let v = serde_json::to_value(&resp).unwrap();
        assert!(v.get("error").unwrap().get("data").is_none());
    }

    #[test]
    fn parse_request_rejects_invalid_json_as_parse_error() {
        let err = parse_request(b"not json").unwrap_err();
        assert_eq!(err.kind, mcp_core::ErrorKind::ParseError);
    }

    #[test]
    fn parse_request_rejects_missing_method_as_invalid_request() {
        let err = parse_request(br#"{"jsonrpc":"2.0","id":1}"#).unwrap_err();
        assert_eq!(err.kind, mcp_core::ErrorKind::InvalidRequest);
    }

    #[test]
    fn parse_request_accepts_a_well_formed_envelope() {
        let req = parse_request(br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).unwrap();
        assert_eq!(req.method, "tools/list");
    }

    #[test]
    fn request_from_value_rejects_missing_method_as_invalid_request() {
        let err = request_from_value(json!({"jsonrpc":"2.0","id":1})).unwrap_err();
        assert_eq!(err.kind, mcp_core::ErrorKind::InvalidRequest);
    }
}
