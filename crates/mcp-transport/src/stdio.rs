//! Line-framed stdio transport (spec.md §4.6 "Stdio").
//!
//! One JSON-RPC object per line on stdin; responses newline-terminated on
//! stdout. A line that isn't JSON at all emits a `-32700` error with id
//! `null`; a line that's valid JSON but not a valid envelope (e.g. missing
//! `method`) emits `-32600` instead. Either way the transport moves on to
//! the next line — no partial-object recovery is attempted mid-line
//! (spec.md §9).

use std::process::Stdio as ProcessStdio;
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use mcp_core::connection::BoxFuture;
use mcp_core::{Context, McpError, OutboundChannel};
use mcp_protocol::{JsonRpcErrorResponse, JsonRpcRequest};
use mcp_server::Engine;
use parking_lot::Mutex as SyncMutex;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::sync::Mutex as AsyncMutex;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

use crate::error::{TransportError, TransportResult};
use crate::traits::Transport;

const STDIO_CLIENT_ID: &str = "stdio";

/// The `OutboundChannel` backing the stdio client: writes go through a
/// shared, lock-guarded `FramedWrite` so concurrent streaming emitters and
/// the main reply path can't interleave partial lines.
struct StdioChannel {
    writer: Arc<AsyncMutex<FramedWrite<Box<dyn AsyncWrite + Send + Unpin>, LinesCodec>>>,
    closed: Arc<SyncMutex<bool>>,
}

impl std::fmt::Debug for StdioChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdioChannel").finish()
    }
}

impl OutboundChannel for StdioChannel {
    fn send(&self, message: Value) -> BoxFuture<'_, mcp_core::McpResult<()>> {
        let writer = self.writer.clone();
        let closed = self.closed.clone();
        Box::pin(async move {
            if *closed.lock() {
                return Err(McpError::internal("stdio connection closed"));
            }
            let line = serde_json::to_string(&message)
                .map_err(|e| McpError::internal(format!("failed to serialize message: {e}")))?;
            let mut writer = writer.lock().await;
            writer
                .send(line)
                .await
                .map_err(|e| McpError::internal(format!("stdio write failed: {e}")))
        })
    }

    fn is_closed(&self) -> bool {
        *self.closed.lock()
    }
}

/// Stdio transport: a single logical client speaking line-framed JSON-RPC
/// over a duplex byte channel (process stdio, or an externally spawned
/// command's stdio when `run_with_command` is used).
pub struct StdioTransport {
    channel: Arc<StdioChannel>,
}

impl std::fmt::Debug for StdioTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdioTransport").finish()
    }
}

impl StdioTransport {
    fn new(writer: Box<dyn AsyncWrite + Send + Unpin>) -> Self {
        Self {
            channel: Arc::new(StdioChannel {
                writer: Arc::new(AsyncMutex::new(FramedWrite::new(writer, LinesCodec::new()))),
                closed: Arc::new(SyncMutex::new(false)),
            }),
        }
    }

    /// Run the transport against this process's own stdin/stdout until EOF.
    pub async fn run(engine: Arc<Engine>) -> TransportResult<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let transport = Self::new(Box::new(tokio::io::stdout()));
        transport.serve(reader, engine).await
    }

    /// Spawn `command` and run the transport against its stdin/stdout,
    /// monitoring the child's exit (spec.md §4.6 "Optional mode").
    pub async fn run_with_command(command: &str, args: &[String], engine: Arc<Engine>) -> TransportResult<()> {
        let mut child = tokio::process::Command::new(command)
            .args(args)
            .stdin(ProcessStdio::piped())
            .stdout(ProcessStdio::piped())
            .spawn()
            .map_err(|e| TransportError::StartupFailed(e.to_string()))?;

        let child_stdout = child
            .stdout
            .take()
            .ok_or_else(|| TransportError::StartupFailed("child stdout not piped".to_string()))?;
        let child_stdin = child
            .stdin
            .take()
            .ok_or_else(|| TransportError::StartupFailed("child stdin not piped".to_string()))?;

        let transport = Self::new(Box::new(child_stdin));
        let reader = BufReader::new(child_stdout);

        tokio::select! {
            result = transport.serve(reader, engine) => result,
            status = child.wait() => {
                tracing::info!(?status, "spawned command exited");
                Ok(())
            }
        }
    }

    async fn serve<R: AsyncRead + Unpin>(&self, reader: R, engine: Arc<Engine>) -> TransportResult<()> {
        let mut lines = FramedRead::new(reader, LinesCodec::new());

        while let Some(line) = lines.next().await {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    tracing::warn!(error = %err, "stdio line read failed, stopping transport");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match mcp_protocol::parse_request(line.as_bytes()) {
                Ok(request) => request,
                Err(err) => {
                    let error = JsonRpcErrorResponse::from_mcp_error(Value::Null, &err);
                    let _ = self.channel.send(serde_json::to_value(&error).unwrap_or(Value::Null)).await;
                    continue;
                }
            };

            let ctx = Context::new(STDIO_CLIENT_ID, request.id.clone())
                .with_connection_handle(self.channel.clone() as Arc<dyn OutboundChannel>);

            match engine.process_request(&request, &ctx).await {
                Ok(Some(result)) => {
                    let response = mcp_protocol::JsonRpcResponse::new(
                        request.id.clone().unwrap_or(Value::Null),
                        result,
                    );
                    let _ = self.channel.send(serde_json::to_value(&response).unwrap_or(Value::Null)).await;
                }
                Ok(None) => {}
                Err(err) => {
                    let response = JsonRpcErrorResponse::from_mcp_error(
                        request.id.clone().unwrap_or(Value::Null),
                        &err,
                    );
                    let _ = self.channel.send(serde_json::to_value(&response).unwrap_or(Value::Null)).await;
                }
            }
        }

        *self.channel.closed.lock() = true;
        Ok(())
    }
}

impl Transport for StdioTransport {
    fn send(&self, client_id: &str, message: Value) -> BoxFuture<'_, TransportResult<()>> {
        let channel = self.channel.clone();
        let client_id = client_id.to_string();
        Box::pin(async move {
            if client_id != STDIO_CLIENT_ID {
                return Err(TransportError::NotConnected(client_id));
            }
            channel
                .send(message)
                .await
                .map_err(|e| TransportError::SendFailed(e.to_string()))
        })
    }

    fn broadcast(&self, message: Value) -> BoxFuture<'_, TransportResult<()>> {
        Box::pin(async move { self.send(STDIO_CLIENT_ID, message).await })
    }

    fn close(&self, _client_id: &str) -> BoxFuture<'_, TransportResult<()>> {
        let closed = self.channel.closed.clone();
        Box::pin(async move {
            *closed.lock() = true;
            Ok(())
        })
    }

    fn shutdown(&self) -> BoxFuture<'_, TransportResult<()>> {
        self.close(STDIO_CLIENT_ID)
    }
}
