//! Foundation types shared by every crate in the MCP request engine:
//! the unified error type, per-request [`Context`], the outbound-channel
//! abstraction streaming handlers write through, and request-id generation.
//!
//! Mirrors the role `turbomcp-core` plays in the teacher workspace: the one
//! crate every other crate depends on, and the only one that depends on
//! nothing else in the workspace.

#![warn(missing_debug_implementations, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod connection;
pub mod context;
pub mod error;
pub mod identifier;

pub use connection::OutboundChannel;
pub use context::{ClientCapabilities, Context};
pub use error::{ErrorKind, HandlerFailure, McpError, McpResult};
pub use identifier::RequestIdGenerator;
