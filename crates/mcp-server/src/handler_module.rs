//! Handler-module override hook (spec.md §4.4 "Handler-module override").

use async_trait::async_trait;
use mcp_core::{Context, McpError};
use serde_json::Value;

/// What an overriding callback decided to do instead of the engine's
/// default behavior for a given method.
#[derive(Debug)]
pub enum HandlerOutcome {
    /// Respond immediately with this result value.
    Reply(Value),
    /// Take the streaming path: the engine has already replied
    /// `{"status":"streaming"}`; the module is responsible for writing its
    /// own progress/terminal messages through `ctx.connection_handle`.
    Streaming,
    /// Fail the request with this JSON-RPC error.
    Error(McpError),
}

/// User-supplied overrides for the default dispatch behavior (spec.md §3
/// "Server State" `handler_module`, §4.4 "Handler-module override").
///
/// Every method defaults to `None`, meaning "fall through to the engine's
/// built-in behavior for this method". A module only needs to implement the
/// methods it wants to intercept. State private to the module (database
/// handles, counters, …) lives in `Self` — the engine threads it through
/// opaquely by holding one `Arc<dyn HandlerModule>` for the server's
/// lifetime.
#[async_trait]
pub trait HandlerModule: Send + Sync {
    async fn initialize(&self, _params: Value, _ctx: &Context) -> Option<HandlerOutcome> {
        None
    }

    async fn list_resources(&self, _ctx: &Context) -> Option<HandlerOutcome> {
        None
    }

    async fn get_resource(&self, _params: Value, _ctx: &Context) -> Option<HandlerOutcome> {
        None
    }

    async fn list_prompts(&self, _ctx: &Context) -> Option<HandlerOutcome> {
        None
    }

    async fn get_prompt(&self, _params: Value, _ctx: &Context) -> Option<HandlerOutcome> {
        None
    }

    async fn list_tools(&self, _ctx: &Context) -> Option<HandlerOutcome> {
        None
    }

    async fn execute_tool(&self, _params: Value, _ctx: &Context) -> Option<HandlerOutcome> {
        None
    }
}
