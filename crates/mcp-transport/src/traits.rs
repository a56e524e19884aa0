//! The Transport contract (spec.md §4.5): send/broadcast/close/shutdown,
//! with per-client FIFO ordering of outbound messages.

use mcp_core::connection::BoxFuture;
use serde_json::Value;

use crate::error::TransportResult;

/// Common operations every wire transport exposes, independent of its
/// framing (stdio lines, HTTP request/response, SSE, NDJSON chunks).
///
/// Matches the shape of `turbomcp_transport_traits::Transport` pared down
/// to what the engine actually drives transports through in this design:
/// the engine talks to one client at a time via `Context::connection_handle`
/// (`mcp_core::OutboundChannel`); this trait is the transport-level
/// management surface above that — the thing a deployment holds onto to
/// broadcast, evict a client, or shut the whole transport down.
pub trait Transport: Send + Sync {
    /// Deliver one message to one connected client.
    fn send(&self, client_id: &str, message: Value) -> BoxFuture<'_, TransportResult<()>>;

    /// Deliver one message to every connected client. Transports that can
    /// only ever address a single request/response pair (plain HTTP) return
    /// `Err(TransportError::BroadcastUnsupported)`.
    fn broadcast(&self, message: Value) -> BoxFuture<'_, TransportResult<()>>;

    /// Terminate one client's connection.
    fn close(&self, client_id: &str) -> BoxFuture<'_, TransportResult<()>>;

    /// Terminate every connection and stop the transport.
    fn shutdown(&self) -> BoxFuture<'_, TransportResult<()>>;
}
