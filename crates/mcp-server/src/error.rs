//! Engine-level error type (spec.md §7).

use mcp_registry::RegistryError;

/// Result type for engine construction/configuration operations. Per-request
/// dispatch failures never surface this type — they're captured as JSON-RPC
/// error objects instead (§7 "no stack traces leak across the boundary").
pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ServerError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("configuration error: {message}")]
    Configuration { message: String },
}
