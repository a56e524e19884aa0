//! Per-request context (spec.md §3 "Context", §4.7).

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::Span;

use crate::connection::OutboundChannel;

/// Snapshot of the capabilities a client advertised during `initialize`.
///
/// Stored verbatim as the client sent it; the engine does not interpret
/// these beyond echoing them back, per spec.md §1's "non-goal: protocol
/// version negotiation beyond echoing a single fixed version string".
pub type ClientCapabilities = Value;

/// Per-request value bundle passed to every capability handler.
///
/// Immutable once constructed (spec.md §3 invariant 3): none of its fixed
/// fields change after `Context::new`. The one mutable part is the
/// custom-data bag, which is an intentional scratch space for
/// application-level key/value state threaded across a single request —
/// not a channel for engine bookkeeping. Streaming output never mutates a
/// `Context`; it always goes through `connection_handle`.
#[derive(Clone)]
pub struct Context {
    /// Stable identifier for the connected client (transport-assigned).
    pub client_id: String,
    /// The request id this context was built for, if the inbound message
    /// carried one. `None` means the inbound message was a notification —
    /// the engine still dispatches it but must not emit a response.
    pub request_id: Option<Value>,
    /// Capabilities negotiated at `initialize` time for this client.
    pub client_capabilities: ClientCapabilities,
    /// Set by the transport when the caller wants (and the tool supports)
    /// a streaming invocation — see spec.md §4.4 "Streaming tool execution".
    pub streaming: bool,
    /// The channel used to write progress notifications and terminal
    /// messages back to this client. `None` for transports that only ever
    /// produce a single synchronous reply (plain HTTP without streaming).
    pub connection_handle: Option<Arc<dyn OutboundChannel>>,
    /// Tracing span correlating every log line emitted while this request
    /// is in flight with its request id and client id.
    pub span: Span,
    custom_data: Arc<RwLock<HashMap<String, Value>>>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("client_id", &self.client_id)
            .field("request_id", &self.request_id)
            .field("streaming", &self.streaming)
            .field("has_connection", &self.connection_handle.is_some())
            .finish()
    }
}

impl Context {
    /// Build a new context for an inbound request/notification.
    #[must_use]
    pub fn new(client_id: impl Into<String>, request_id: Option<Value>) -> Self {
        let client_id = client_id.into();
        let span = tracing::info_span!("mcp.request", client_id = %client_id, request_id = ?request_id);
        Self {
            client_id,
            request_id,
            client_capabilities: Value::Null,
            streaming: false,
            connection_handle: None,
            span,
            custom_data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Attach negotiated client capabilities (builder style).
    #[must_use]
    pub fn with_client_capabilities(mut self, caps: ClientCapabilities) -> Self {
        self.client_capabilities = caps;
        self
    }

    /// Mark this context as a streaming invocation (builder style).
    #[must_use]
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Attach the outbound channel for this client (builder style).
    #[must_use]
    pub fn with_connection_handle(mut self, handle: Arc<dyn OutboundChannel>) -> Self {
        self.connection_handle = Some(handle);
        self
    }

    /// Store a value in the per-request custom-data bag.
    pub fn put(&self, key: impl Into<String>, value: Value) {
        self.custom_data.write().insert(key.into(), value);
    }

    /// Read a value from the custom-data bag, falling back to `default`.
    #[must_use]
    pub fn get(&self, key: &str, default: Value) -> Value {
        self.custom_data
            .read()
            .get(key)
            .cloned()
            .unwrap_or(default)
    }

    /// `true` if this context was built for a notification (no `id`).
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        self.request_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn custom_data_round_trips() {
        let ctx = Context::new("client-1", Some(json!(1)));
        ctx.put("key", json!("value"));
        assert_eq!(ctx.get("key", Value::Null), json!("value"));
        assert_eq!(ctx.get("missing", json!(42)), json!(42));
    }

    #[test]
    fn clone_shares_custom_data() {
        let ctx = Context::new("client-1", Some(json!(1)));
        let cloned = ctx.clone();
        ctx.put("shared", json!(true));
        assert_eq!(cloned.get("shared", Value::Null), json!(true));
    }

    #[test]
    fn notification_has_no_request_id() {
        let ctx = Context::new("client-1", None);
        assert!(ctx.is_notification());
    }
}
