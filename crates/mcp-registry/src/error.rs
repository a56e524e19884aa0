//! Registry-specific error type (spec.md §4.3).

use thiserror::Error;

/// Failures a registry mutation can report. Distinct from [`mcp_core::McpError`]
/// because these never cross the JSON-RPC boundary directly — `mcp-server`
/// translates them when a registration happens to be triggered by an RPC call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool identifier must be non-empty")]
    InvalidTool,
    #[error("resource identifier must be non-empty")]
    InvalidResource,
    #[error("prompt identifier must be non-empty")]
    InvalidPrompt,
}
