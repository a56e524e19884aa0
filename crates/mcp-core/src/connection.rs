//! The per-client outbound channel abstraction.
//!
//! `Context::connection_handle` is an `Arc<dyn OutboundChannel>`: the one
//! thing a streaming task (or the engine's terminal-message emitter) is
//! allowed to write through. Transports implement this trait once per
//! connected client; the engine and handler tasks never see transport
//! internals, only this narrow interface — matching the teacher's use of a
//! boxed `Transport` trait object behind `Arc` so the server core stays
//! decoupled from stdio/HTTP/SSE specifics (`turbomcp-transport-traits::Transport`).

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::error::McpResult;

/// A future boxed for storage in a trait object method return position.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The narrow interface a streaming task or the engine uses to write a
/// message back to one connected client.
///
/// Implementors MUST preserve FIFO ordering of messages sent through the
/// same handle (spec.md §4.5): writes are serialized per client by this
/// object, not by the caller.
pub trait OutboundChannel: Send + Sync + fmt::Debug {
    /// Deliver one JSON-RPC message (response, error, or notification) to
    /// the client this handle addresses.
    ///
    /// Returns an error if the connection has already been closed; callers
    /// (streaming emitters in particular) treat that as "stop, the next
    /// `emit` fails and the task is expected to return" per spec.md §5.
    fn send(&self, message: Value) -> BoxFuture<'_, McpResult<()>>;

    /// `true` once the underlying connection has been closed or lost.
    fn is_closed(&self) -> bool;
}

/// In-memory `OutboundChannel` for tests, enabled by the `test-util` feature
/// so sibling crates' test suites (`mcp-server`, `mcp-transport`) can depend
/// on it as a dev-dependency without re-implementing a fake channel.
#[cfg(any(test, feature = "test-util"))]
pub mod test_support {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// An in-memory `OutboundChannel` that records every message sent,
    /// used by `mcp-server`/`mcp-transport` tests that need to assert on
    /// emission order without standing up a real transport.
    #[derive(Debug, Default, Clone)]
    pub struct RecordingChannel {
        sent: Arc<Mutex<Vec<Value>>>,
        closed: Arc<Mutex<bool>>,
    }

    impl RecordingChannel {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn close(&self) {
            *self.closed.lock() = true;
        }

        pub fn messages(&self) -> Vec<Value> {
            self.sent.lock().clone()
        }
    }

    impl OutboundChannel for RecordingChannel {
        fn send(&self, message: Value) -> BoxFuture<'_, McpResult<()>> {
            let sent = self.sent.clone();
            let closed = self.closed.clone();
            Box::pin(async move {
                if *closed.lock() {
                    return Err(crate::error::McpError::internal("connection closed"));
                }
                sent.lock().push(message);
                Ok(())
            })
        }

        fn is_closed(&self) -> bool {
            *self.closed.lock()
        }
    }
}
