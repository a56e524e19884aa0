//! The JSON-RPC request engine (spec.md §4.4): lifecycle state machine,
//! method dispatch table, default capability listings, and streaming tool
//! execution orchestration.

#![warn(missing_debug_implementations, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod config;
mod engine;
mod error;
mod handler_module;
mod streaming;

pub use config::ServerConfig;
pub use engine::Engine;
pub use error::{ServerError, ServerResult};
pub use handler_module::{HandlerModule, HandlerOutcome};
