//! Wire types and capability contracts for the MCP request engine:
//! the JSON-RPC envelope (§6), the Tool/Resource/Prompt traits (§4.1), and
//! the default server capabilities payload (§4.4).

#![warn(missing_debug_implementations, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod capabilities;
pub mod capability;
pub mod jsonrpc;
mod naming;

pub use capabilities::{default_capabilities, ServerInfo};
pub use capability::{
    ParamType, Prompt, PromptArgument, PromptBody, PromptMessage, ProgressEmitter, Resource, Role,
    Tool, ToolParameter,
};
pub use jsonrpc::{
    JsonRpcErrorObject, JsonRpcErrorResponse, JsonRpcNotification, JsonRpcRequest,
    JsonRpcResponse, JSONRPC_VERSION, PROTOCOL_VERSION,
};
pub use naming::kebab_case_type_name;
