//! `ServerBuilder` and `Server` (spec.md §9 supplemented "shutdown" design
//! note): the facade's fluent assembly API over a registry and an engine,
//! plus graceful shutdown across every attached transport, generalizing the
//! teacher's `turbomcp-server/src/server/{builder,shutdown}.rs` pair.

use std::sync::Arc;
use std::time::Duration;

use mcp_protocol::{Prompt, Resource, Tool};
use mcp_registry::{RegistryError, Registry};
use mcp_server::{Engine, HandlerModule, ServerConfig};
use mcp_transport::Transport;

/// Fluent builder assembling a registry and an `Engine` from it.
///
/// Mirrors the teacher's `ServerBuilder::{tool,resource,prompt}` shape, but
/// registers directly into a shared `Registry` (this design's registry is
/// already interior-mutable) rather than threading a handler-registry
/// builder value through each call.
pub struct ServerBuilder {
    config: ServerConfig,
    registry: Arc<Registry>,
    handler_module: Option<Arc<dyn HandlerModule>>,
}

impl std::fmt::Debug for ServerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerBuilder").finish()
    }
}

impl ServerBuilder {
    #[must_use]
    pub fn new(display_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            config: ServerConfig::new(display_name, version),
            registry: Arc::new(Registry::new()),
            handler_module: None,
        }
    }

    #[must_use]
    pub fn with_module_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config = self.config.with_module_prefix(prefix);
        self
    }

    /// Register a tool. Returns `Err` if the tool's name is empty.
    pub fn tool(self, tool: Arc<dyn Tool>) -> Result<Self, RegistryError> {
        self.registry.register_tool(tool)?;
        Ok(self)
    }

    /// Register a resource. Returns `Err` if the resource's uri is empty.
    pub fn resource(self, resource: Arc<dyn Resource>) -> Result<Self, RegistryError> {
        self.registry.register_resource(resource)?;
        Ok(self)
    }

    /// Register a prompt. Returns `Err` if the prompt's name is empty.
    pub fn prompt(self, prompt: Arc<dyn Prompt>) -> Result<Self, RegistryError> {
        self.registry.register_prompt(prompt)?;
        Ok(self)
    }

    /// Override one or more dispatch methods ahead of the built-in
    /// behavior (spec.md §4.4 "handler-module override").
    #[must_use]
    pub fn handler_module(mut self, module: Arc<dyn HandlerModule>) -> Self {
        self.handler_module = Some(module);
        self
    }

    #[must_use]
    pub fn build(self) -> Arc<Engine> {
        let mut engine = Engine::new(self.config, self.registry);
        if let Some(module) = self.handler_module {
            engine = engine.with_handler_module(module);
        }
        Arc::new(engine)
    }
}

/// An engine plus the transports serving it, with one place to initiate a
/// coordinated, bounded-grace shutdown of both.
pub struct Server {
    engine: Arc<Engine>,
    transports: Vec<Arc<dyn Transport>>,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("transports", &self.transports.len())
            .finish()
    }
}

impl Server {
    #[must_use]
    pub fn new(engine: Arc<Engine>) -> Self {
        Self {
            engine,
            transports: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transports.push(transport);
        self
    }

    #[must_use]
    pub fn engine(&self) -> Arc<Engine> {
        self.engine.clone()
    }

    /// Shut down every attached transport, then wait up to `grace` for
    /// outstanding streaming tool invocations to finish. Returns `true` if
    /// every streaming task drained within the grace period.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        for transport in &self.transports {
            if let Err(err) = transport.shutdown().await {
                tracing::warn!(error = %err, "transport shutdown failed, continuing");
            }
        }
        self.engine.shutdown(grace).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mcp_core::{Context, HandlerFailure};
    use serde_json::{json, Value};

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> String {
            "echo".to_string()
        }

        async fn handle(&self, params: Value, _ctx: &Context) -> Result<Value, HandlerFailure> {
            Ok(params)
        }
    }

    #[test]
    fn empty_name_tool_registration_fails() {
        struct Nameless;
        #[async_trait]
        impl Tool for Nameless {
            fn name(&self) -> String {
                String::new()
            }
            async fn handle(&self, _: Value, _: &Context) -> Result<Value, HandlerFailure> {
                unimplemented!()
            }
        }

        let builder = ServerBuilder::new("t", "0.1.0");
        assert!(builder.tool(Arc::new(Nameless)).is_err());
    }

    #[tokio::test]
    async fn build_registers_tool_and_dispatches() {
        let engine = ServerBuilder::new("t", "0.1.0").tool(Arc::new(Echo)).unwrap().build();

        let ctx = Context::new("c1", Some(json!(1)));
        let init = mcp_protocol::JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "initialize".to_string(),
            params: Some(json!({})),
            id: Some(json!(1)),
        };
        engine.process_request(&init, &ctx).await.unwrap();

        let list = mcp_protocol::JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "tools/list".to_string(),
            params: None,
            id: Some(json!(2)),
        };
        let resp = engine.process_request(&list, &ctx).await.unwrap().unwrap();
        assert_eq!(resp["tools"][0]["id"], json!("echo"));
    }

    #[tokio::test]
    async fn shutdown_with_no_transports_just_drains_engine() {
        let engine = ServerBuilder::new("t", "0.1.0").build();
        let server = Server::new(engine);
        assert!(server.shutdown(Duration::from_millis(50)).await);
    }
}
