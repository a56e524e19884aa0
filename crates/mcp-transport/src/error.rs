//! Transport error type (spec.md §7 "Transport I/O failure").

use thiserror::Error;

pub type TransportResult<T> = std::result::Result<T, TransportError>;

#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum TransportError {
    #[error("client not connected: {0}")]
    NotConnected(String),

    #[error("broadcast unsupported on this transport")]
    BroadcastUnsupported,

    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("bind/spawn failure: {0}")]
    StartupFailed(String),
}
