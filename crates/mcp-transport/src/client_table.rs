//! The `client_id -> outbound_channel` map every transport maintains
//! (spec.md §4.6 "Connection bookkeeping").

use std::collections::HashMap;
use std::sync::Arc;

use mcp_core::OutboundChannel;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{TransportError, TransportResult};

/// Tracks connected clients for one transport instance. On channel failure
/// the caller evicts the entry; a streaming task holding a clone of the
/// channel simply sees its next `send` fail (spec.md §5 "Cancellation &
/// timeouts").
#[derive(Default)]
pub struct ClientTable {
    clients: RwLock<HashMap<String, Arc<dyn OutboundChannel>>>,
}

impl std::fmt::Debug for ClientTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientTable")
            .field("connected", &self.clients.read().len())
            .finish()
    }
}

impl ClientTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, client_id: impl Into<String>, channel: Arc<dyn OutboundChannel>) {
        self.clients.write().insert(client_id.into(), channel);
    }

    pub fn evict(&self, client_id: &str) {
        self.clients.write().remove(client_id);
    }

    #[must_use]
    pub fn get(&self, client_id: &str) -> Option<Arc<dyn OutboundChannel>> {
        self.clients.read().get(client_id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub async fn send(&self, client_id: &str, message: Value) -> TransportResult<()> {
        let channel = self
            .get(client_id)
            .ok_or_else(|| TransportError::NotConnected(client_id.to_string()))?;
        channel
            .send(message)
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))
    }

    pub async fn broadcast(&self, message: Value) -> TransportResult<()> {
        let snapshot: Vec<_> = self.clients.read().values().cloned().collect();
        for channel in snapshot {
            if let Err(err) = channel.send(message.clone()).await {
                tracing::warn!(error = %err, "broadcast failed for one client, continuing");
            }
        }
        Ok(())
    }

    pub fn close(&self, client_id: &str) {
        self.evict(client_id);
    }

    pub fn shutdown(&self) {
        self.clients.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_core::connection::test_support::RecordingChannel;
    use serde_json::json;

    #[tokio::test]
    async fn send_to_unknown_client_errors() {
        let table = ClientTable::new();
        let err = table.send("ghost", json!({})).await.unwrap_err();
        assert!(matches!(err, TransportError::NotConnected(_)));
    }

    #[tokio::test]
    async fn send_delivers_to_registered_channel() {
        let table = ClientTable::new();
        let channel = Arc::new(RecordingChannel::new());
        table.insert("c1", channel.clone());
        table.send("c1", json!({"hello": "world"})).await.unwrap();
        assert_eq!(channel.messages(), vec![json!({"hello": "world"})]);
    }

    #[tokio::test]
    async fn evicted_client_is_not_found() {
        let table = ClientTable::new();
        table.insert("c1", Arc::new(RecordingChannel::new()));
        table.evict("c1");
        assert!(table.get("c1").is_none());
    }
}
