//! Transport abstraction and the four concrete transports (spec.md §4.5,
//! §4.6): stdio, plain HTTP, SSE, and chunked NDJSON streaming HTTP.

#![forbid(unsafe_code)]

pub mod client_table;
pub mod error;
pub mod http;
pub mod ndjson;
pub mod sse;
pub mod stdio;
pub mod traits;

pub use client_table::ClientTable;
pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
pub use traits::Transport;
