//! Unified error type for the MCP request engine.
//!
//! A single [`McpError`] is threaded through every crate in the workspace, the
//! way `turbomcp-core::error::McpError` is threaded through the teacher's
//! crates. It carries an [`ErrorKind`] that maps directly onto the JSON-RPC
//! error codes in the wire protocol (see `mcp_protocol::jsonrpc::error_code_for`).

use std::fmt;

/// Result alias for engine operations.
pub type McpResult<T> = Result<T, McpError>;

/// Error classification used to pick a JSON-RPC error code and to let callers
/// match on failure kind without string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `-32700` — the transport could not parse the inbound bytes as JSON.
    ParseError,
    /// `-32600` — the envelope was missing a required field (e.g. `method`).
    InvalidRequest,
    /// `-32002` — a non-`initialize` method arrived before `initialize` succeeded.
    NotInitialized,
    /// `-32601` — no handler is registered for the dispatched method.
    MethodNotFound,
    /// `-32602` — the requested tool/resource/prompt id is not registered, or
    /// params failed validation.
    InvalidParams,
    /// `-32603` — a handler returned or raised an error during execution.
    Internal,
    /// Registration was rejected because the handler did not satisfy the
    /// capability contract (`invalid_tool` / `invalid_resource` / `invalid_prompt`).
    InvalidRegistration,
    /// `-32001` — a transport-boundary authentication or media-type failure.
    AuthOrMedia,
}

impl ErrorKind {
    /// The JSON-RPC error code this kind maps to.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::NotInitialized => -32002,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::Internal => -32603,
            Self::InvalidRegistration => -32602,
            Self::AuthOrMedia => -32001,
        }
    }
}

/// The engine's unified error type.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind:?}: {message}")]
pub struct McpError {
    /// Error classification.
    pub kind: ErrorKind,
    /// Human-readable message. Never includes a stack trace or internal
    /// source location — spec.md §7 forbids leaking those across the
    /// JSON-RPC boundary.
    pub message: String,
}

impl McpError {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// `-32002 Server not initialized`.
    pub fn not_initialized() -> Self {
        Self::new(ErrorKind::NotInitialized, "Server not initialized")
    }

    /// `-32601 Method not found: <name>`.
    pub fn method_not_found(method: impl fmt::Display) -> Self {
        Self::new(ErrorKind::MethodNotFound, format!("Method not found: {method}"))
    }

    /// `-32602` for an unregistered tool/resource/prompt id.
    pub fn not_found(kind_name: &str, id: impl fmt::Display) -> Self {
        Self::new(ErrorKind::InvalidParams, format!("{kind_name} not found: {id}"))
    }

    /// `-32602 Invalid params: <message>`.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParams, message)
    }

    /// `-32600 Invalid request: <message>`.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    /// `-32700 Parse error: <message>`.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseError, message)
    }

    /// `-32603 Internal error: <message>`.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// `-32001` for a transport-boundary authentication or media-type failure.
    pub fn auth_or_media(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthOrMedia, message)
    }
}

/// The four ways a capability handler can signal failure (spec.md §4.1).
///
/// Handlers return `Result<Value, HandlerFailure>`; the engine translates a
/// `HandlerFailure` into the corresponding `McpError` at the dispatch
/// boundary (spec.md §7's "Handler error" row).
#[derive(Debug, Clone)]
pub enum HandlerFailure {
    /// The requested entity does not exist.
    NotFound(String),
    /// The supplied params failed validation or business-rule checks.
    InvalidParams(String),
    /// An unexpected internal condition; message is not client-authored.
    Internal(String),
    /// A handler-chosen message that should be surfaced verbatim.
    Custom(String),
}

impl HandlerFailure {
    /// The message to surface in the JSON-RPC error object.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(m) | Self::InvalidParams(m) | Self::Internal(m) | Self::Custom(m) => m,
        }
    }
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for HandlerFailure {}

impl From<HandlerFailure> for McpError {
    fn from(failure: HandlerFailure) -> Self {
        match failure {
            HandlerFailure::NotFound(m) => McpError::new(ErrorKind::InvalidParams, m),
            HandlerFailure::InvalidParams(m) => McpError::new(ErrorKind::InvalidParams, m),
            HandlerFailure::Internal(m) | HandlerFailure::Custom(m) => {
                McpError::new(ErrorKind::Internal, m)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_codes_match_spec() {
        assert_eq!(ErrorKind::ParseError.code(), -32700);
        assert_eq!(ErrorKind::InvalidRequest.code(), -32600);
        assert_eq!(ErrorKind::NotInitialized.code(), -32002);
        assert_eq!(ErrorKind::MethodNotFound.code(), -32601);
        assert_eq!(ErrorKind::InvalidParams.code(), -32602);
        assert_eq!(ErrorKind::Internal.code(), -32603);
    }

    #[test]
    fn not_initialized_message() {
        let err = McpError::not_initialized();
        assert_eq!(err.kind, ErrorKind::NotInitialized);
        assert!(err.message.contains("not initialized"));
    }

    #[test]
    fn handler_failure_converts_to_mcp_error() {
        let failure = HandlerFailure::Custom("Cannot divide by zero".into());
        let err: McpError = failure.into();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, "Cannot divide by zero");
    }
}
