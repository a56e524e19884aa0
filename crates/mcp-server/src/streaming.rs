//! Streaming tool execution orchestration (spec.md §4.4 "Streaming tool
//! execution", §9 design note on avoiding the original's "emit to caller's
//! own mailbox" bug: every write here goes through `ctx.connection_handle`,
//! never anything resembling the caller's own response channel).

use std::sync::Arc;

use async_trait::async_trait;
use mcp_core::{Context, HandlerFailure, OutboundChannel};
use mcp_protocol::{JsonRpcErrorResponse, JsonRpcNotification, ProgressEmitter, Tool};
use serde_json::{json, Value};
use tokio_util::task::TaskTracker;

/// Emits `progress` notifications to one client's outbound channel.
struct ChannelEmitter {
    channel: Arc<dyn OutboundChannel>,
}

#[async_trait]
impl ProgressEmitter for ChannelEmitter {
    async fn emit(&self, progress: Value) -> Result<(), HandlerFailure> {
        let notification = JsonRpcNotification::progress(progress);
        self.channel
            .send(serde_json::to_value(&notification).unwrap_or(Value::Null))
            .await
            .map_err(|e| HandlerFailure::Internal(e.message))
    }
}

/// Spawn the independent task that runs a streaming tool invocation to
/// completion and writes its terminal message, per spec.md §4.4 steps 2-3.
///
/// The caller has already sent the immediate `{"status":"streaming"}` reply;
/// this function never touches that response, only `ctx.connection_handle`.
/// Spawned through `tracker` so a facade-level shutdown can await every
/// outstanding streaming invocation instead of abandoning it mid-flight
/// (spec.md §9 supplemented "shutdown" design note).
pub fn spawn_streaming_tool(tool: Arc<dyn Tool>, params: Value, ctx: Context, tracker: &TaskTracker) {
    tracker.spawn(async move {
        let Some(channel) = ctx.connection_handle.clone() else {
            tracing::warn!("streaming tool invoked without a connection handle, dropping");
            return;
        };
        let emitter = ChannelEmitter {
            channel: channel.clone(),
        };

        let request_id = ctx.request_id.clone().unwrap_or(Value::Null);

        let terminal = match tool.handle_stream(params, &ctx, &emitter).await {
            Ok(value) => json!({
                "jsonrpc": mcp_protocol::JSONRPC_VERSION,
                "id": request_id,
                "result": {"status": "complete", "data": value},
            }),
            Err(failure) => {
                let err = mcp_core::McpError::from(failure);
                serde_json::to_value(JsonRpcErrorResponse::from_mcp_error(request_id, &err))
                    .unwrap_or(Value::Null)
            }
        };

        if let Err(err) = channel.send(terminal).await {
            tracing::warn!(error = %err, "failed to deliver streaming terminal message");
        }
    });
}
