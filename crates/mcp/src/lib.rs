//! Facade crate: re-exports the engine, registry, protocol, and transport
//! crates behind one dependency, plus `ServerBuilder`/`Server` for assembling
//! and gracefully shutting down a running deployment (spec.md "mcp" row in
//! §1's crate table).

#![forbid(unsafe_code)]

mod server;
mod tracing_init;

pub use server::{Server, ServerBuilder};
pub use tracing_init::init_tracing;

pub use mcp_attrs::{parse_doc_block, Kind, ParsedMetadata};
pub use mcp_core::{
    ClientCapabilities, Context, ErrorKind, HandlerFailure, McpError, McpResult, OutboundChannel,
};
pub use mcp_macros::{mcp_prompt, mcp_resource, mcp_tool};
pub use mcp_protocol::{
    default_capabilities, JsonRpcErrorResponse, JsonRpcNotification, JsonRpcRequest,
    JsonRpcResponse, ParamType, ProgressEmitter, Prompt, PromptArgument, PromptBody,
    PromptMessage, Resource, Role, Tool, ToolParameter, JSONRPC_VERSION, PROTOCOL_VERSION,
};
pub use mcp_registry::{Registry, RegistryError};
pub use mcp_server::{Engine, HandlerModule, HandlerOutcome, ServerConfig, ServerError, ServerResult};
pub use mcp_transport::{ClientTable, StdioTransport, Transport, TransportError};

/// Convenience re-export bundle for implementing crates: `use mcp::prelude::*;`.
pub mod prelude {
    pub use crate::{
        init_tracing, mcp_prompt, mcp_resource, mcp_tool, Context, Engine, ErrorKind,
        HandlerFailure, HandlerModule, HandlerOutcome, JsonRpcRequest, McpError, McpResult,
        ParamType, ProgressEmitter, Prompt, PromptArgument, PromptBody, PromptMessage, Registry,
        Resource, Role, Server, ServerBuilder, ServerConfig, Tool, ToolParameter,
        JSONRPC_VERSION,
    };
    pub use async_trait::async_trait;
    pub use serde_json::{json, Value};
}
