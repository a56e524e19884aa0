//! The Request Engine (spec.md §4.4): lifecycle gate, method dispatch,
//! default capability listings, streaming handoff.

use std::sync::Arc;

use mcp_core::{Context, McpError, McpResult};
use mcp_protocol::{
    default_capabilities, JsonRpcRequest, Prompt, Resource, Tool, PROTOCOL_VERSION,
};
use mcp_registry::Registry;
use parking_lot::RwLock;
use serde_json::{json, Value};
use tokio_util::task::TaskTracker;

use crate::config::ServerConfig;
use crate::handler_module::{HandlerModule, HandlerOutcome};
use crate::streaming;

/// Central dispatcher. One `Engine` instance serves every connection by
/// default (spec.md §4.4 "one engine serves all connections"); deployments
/// wanting per-connection lifecycle state construct one `Engine` per
/// connection instead — both are supported by this type, which carries no
/// transport-specific state itself.
pub struct Engine {
    config: ServerConfig,
    registry: Arc<Registry>,
    handler_module: Option<Arc<dyn HandlerModule>>,
    initialized: RwLock<bool>,
    client_capabilities: RwLock<Value>,
    streaming_tasks: TaskTracker,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("display_name", &self.config.display_name)
            .field("initialized", &*self.initialized.read())
            .finish()
    }
}

impl Engine {
    #[must_use]
    pub fn new(config: ServerConfig, registry: Arc<Registry>) -> Self {
        Self {
            config,
            registry,
            handler_module: None,
            initialized: RwLock::new(false),
            client_capabilities: RwLock::new(Value::Null),
            streaming_tasks: TaskTracker::new(),
        }
    }

    #[must_use]
    pub fn with_handler_module(mut self, module: Arc<dyn HandlerModule>) -> Self {
        self.handler_module = Some(module);
        self
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        *self.initialized.read()
    }

    /// Stop accepting new streaming tasks and wait, up to `grace`, for every
    /// outstanding one to finish writing its terminal message. Returns
    /// `true` if every task drained within the grace period.
    pub async fn shutdown(&self, grace: std::time::Duration) -> bool {
        self.streaming_tasks.close();
        tokio::time::timeout(grace, self.streaming_tasks.wait()).await.is_ok()
    }

    /// Dispatch one inbound JSON-RPC envelope.
    ///
    /// Returns `Ok(None)` for a well-formed notification (no id): dispatched
    /// for side effects, no response emitted. Malformed-envelope and
    /// dispatch errors are returned as `Err` so the transport can shape them
    /// into an error response with the right id.
    pub async fn process_request(
        &self,
        request: &JsonRpcRequest,
        ctx: &Context,
    ) -> McpResult<Option<Value>> {
        let method = request.bare_method().to_string();

        if method != "initialize" && !self.is_initialized() {
            return Err(McpError::not_initialized());
        }

        if let Some(module) = &self.handler_module {
            if let Some(outcome) = self.try_override(module.as_ref(), &method, request, ctx).await
            {
                return self.apply_outcome(outcome, request, ctx);
            }
        }

        let result = match method.as_str() {
            "initialize" => self.handle_initialize(request.params.clone().unwrap_or(Value::Null)),
            "resources/list" => Ok(self.handle_list_resources()),
            "resources/get" => self.handle_get_resource(request.params.clone().unwrap_or(Value::Null), ctx).await,
            "prompts/list" => Ok(self.handle_list_prompts()),
            "prompts/get" => self.handle_get_prompt(request.params.clone().unwrap_or(Value::Null), ctx).await,
            "tools/list" => Ok(self.handle_list_tools()),
            "tools/execute" => self.handle_execute_tool(request.params.clone().unwrap_or(Value::Null), ctx).await,
            other => Err(McpError::method_not_found(other)),
        }?;

        if request.is_notification() {
            Ok(None)
        } else {
            Ok(Some(result))
        }
    }

    async fn try_override(
        &self,
        module: &dyn HandlerModule,
        method: &str,
        request: &JsonRpcRequest,
        ctx: &Context,
    ) -> Option<HandlerOutcome> {
        let params = request.params.clone().unwrap_or(Value::Null);
        match method {
            "initialize" => module.initialize(params, ctx).await,
            "resources/list" => module.list_resources(ctx).await,
            "resources/get" => module.get_resource(params, ctx).await,
            "prompts/list" => module.list_prompts(ctx).await,
            "prompts/get" => module.get_prompt(params, ctx).await,
            "tools/list" => module.list_tools(ctx).await,
            "tools/execute" => module.execute_tool(params, ctx).await,
            _ => None,
        }
    }

    fn apply_outcome(
        &self,
        outcome: HandlerOutcome,
        request: &JsonRpcRequest,
        _ctx: &Context,
    ) -> McpResult<Option<Value>> {
        match outcome {
            HandlerOutcome::Reply(value) => {
                Ok(if request.is_notification() { None } else { Some(value) })
            }
            HandlerOutcome::Streaming => Ok(Some(json!({"status": "streaming"}))),
            HandlerOutcome::Error(err) => Err(err),
        }
    }

    fn handle_initialize(&self, params: Value) -> McpResult<Value> {
        *self.client_capabilities.write() = params.get("capabilities").cloned().unwrap_or(Value::Null);
        *self.initialized.write() = true;

        Ok(json!({
            "serverInfo": {
                "name": self.config.display_name,
                "version": self.config.version,
            },
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": default_capabilities(),
        }))
    }

    fn handle_list_resources(&self) -> Value {
        let records: Vec<Value> = self
            .registry
            .get_resources()
            .iter()
            .map(|r| {
                json!({
                    "id": r.uri(),
                    "name": r.name(),
                    "description": r.description(),
                    "mimeType": r.mime_type(),
                })
            })
            .collect();
        json!({ "resources": records })
    }

    async fn handle_get_resource(&self, params: Value, ctx: &Context) -> McpResult<Value> {
        let id = params
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| McpError::invalid_params("Missing required field: id"))?;

        let resource = self
            .registry
            .get_resource(id)
            .ok_or_else(|| McpError::not_found("Resource", id))?;

        let content = resource.read(params.clone(), ctx).await?;
        Ok(json!({
            "id": resource.uri(),
            "name": resource.name(),
            "description": resource.description(),
            "mimeType": resource.mime_type(),
            "content": content,
        }))
    }

    fn handle_list_prompts(&self) -> Value {
        let records: Vec<Value> = self
            .registry
            .get_prompts()
            .iter()
            .map(|p| {
                json!({
                    "id": p.name(),
                    "name": p.name(),
                    "description": p.description(),
                    "arguments": p.arguments(),
                })
            })
            .collect();
        json!({ "prompts": records })
    }

    async fn handle_get_prompt(&self, params: Value, ctx: &Context) -> McpResult<Value> {
        let id = params
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| McpError::invalid_params("Missing required field: id"))?;

        let prompt = self
            .registry
            .get_prompt(id)
            .ok_or_else(|| McpError::not_found("Prompt", id))?;

        let body = prompt.get(params.clone(), ctx).await?;
        Ok(serde_json::to_value(body).unwrap_or(Value::Null))
    }

    fn handle_list_tools(&self) -> Value {
        let records: Vec<Value> = self
            .registry
            .get_tools()
            .iter()
            .map(|t| {
                json!({
                    "id": t.name(),
                    "name": t.name(),
                    "description": t.description(),
                    "parameters": t.parameters(),
                })
            })
            .collect();
        json!({ "tools": records })
    }

    async fn handle_execute_tool(&self, params: Value, ctx: &Context) -> McpResult<Value> {
        let id = params
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| McpError::invalid_params("Missing required field: id"))?;

        let tool = self
            .registry
            .get_tool(id)
            .ok_or_else(|| McpError::not_found("Tool", id))?;

        let call_params = params.get("params").cloned().unwrap_or(Value::Null);

        if ctx.streaming && tool.supports_streaming() {
            streaming::spawn_streaming_tool(tool, call_params, ctx.clone(), &self.streaming_tasks);
            return Ok(json!({"status": "streaming"}));
        }

        let result = tool.handle(call_params, ctx).await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mcp_core::HandlerFailure;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl mcp_protocol::Tool for EchoTool {
        fn name(&self) -> String {
            "echo".to_string()
        }

        async fn handle(&self, params: Value, _ctx: &Context) -> Result<Value, HandlerFailure> {
            Ok(params)
        }
    }

    fn make_engine() -> Engine {
        let registry = Arc::new(Registry::new());
        registry.register_tool(Arc::new(EchoTool)).unwrap();
        Engine::new(ServerConfig::new("test-server", "0.1.0"), registry)
    }

    fn request(method: &str, id: Option<Value>, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id,
        }
    }

    #[tokio::test]
    async fn methods_other_than_initialize_fail_before_init() {
        let engine = make_engine();
        let ctx = Context::new("c1", Some(json!(1)));
        let req = request("tools/list", Some(json!(1)), None);
        let err = engine.process_request(&req, &ctx).await.unwrap_err();
        assert_eq!(err.kind, mcp_core::ErrorKind::NotInitialized);
    }

    #[tokio::test]
    async fn initialize_then_tools_list_succeeds() {
        let engine = make_engine();
        let ctx = Context::new("c1", Some(json!(1)));

        let init_req = request("initialize", Some(json!(1)), Some(json!({})));
        let resp = engine.process_request(&init_req, &ctx).await.unwrap().unwrap();
        assert_eq!(resp["protocolVersion"], json!(PROTOCOL_VERSION));
        assert!(engine.is_initialized());

        let list_req = request("mcp/tools/list", Some(json!(2)), None);
        let resp = engine.process_request(&list_req, &ctx).await.unwrap().unwrap();
        assert_eq!(resp["tools"][0]["id"], json!("echo"));
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let engine = make_engine();
        *engine.initialized.write() = true;
        let ctx = Context::new("c1", Some(json!(1)));
        let req = request("bogus/method", Some(json!(1)), None);
        let err = engine.process_request(&req, &ctx).await.unwrap_err();
        assert_eq!(err.kind, mcp_core::ErrorKind::MethodNotFound);
    }

    #[tokio::test]
    async fn notification_dispatch_returns_no_response() {
        let engine = make_engine();
        *engine.initialized.write() = true;
        let ctx = Context::new("c1", None);
        let req = request("tools/list", None, None);
        let resp = engine.process_request(&req, &ctx).await.unwrap();
        assert!(resp.is_none());
    }

    #[tokio::test]
    async fn shutdown_waits_for_outstanding_streaming_task() {
        struct SlowCounter;

        #[async_trait]
        impl mcp_protocol::Tool for SlowCounter {
            async fn handle(&self, params: Value, _ctx: &Context) -> Result<Value, HandlerFailure> {
                Ok(params)
            }

            async fn handle_stream(
                &self,
                _params: Value,
                _ctx: &Context,
                _emit: &dyn mcp_protocol::ProgressEmitter,
            ) -> Result<Value, HandlerFailure> {
                tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                Ok(json!({"done": true}))
            }

            fn supports_streaming(&self) -> bool {
                true
            }
        }

        let registry = Arc::new(Registry::new());
        registry.register_tool(Arc::new(SlowCounter)).unwrap();
        let engine = Engine::new(ServerConfig::new("test-server", "0.1.0"), registry);
        *engine.initialized.write() = true;

        let channel = Arc::new(mcp_core::connection::test_support::RecordingChannel::new());
        let ctx = Context::new("c1", Some(json!(1)))
            .with_streaming(true)
            .with_connection_handle(channel.clone());

        let req = request(
            "tools/execute",
            Some(json!(1)),
            Some(json!({"id": "slow-counter"})),
        );
        let resp = engine.process_request(&req, &ctx).await.unwrap().unwrap();
        assert_eq!(resp["status"], json!("streaming"));

        let finished = engine.shutdown(std::time::Duration::from_millis(500)).await;
        assert!(finished);
        assert_eq!(channel.messages().len(), 1);
    }

    #[tokio::test]
    async fn execute_unknown_tool_is_invalid_params() {
        let engine = make_engine();
        *engine.initialized.write() = true;
        let ctx = Context::new("c1", Some(json!(1)));
        let req = request("tools/execute", Some(json!(1)), Some(json!({"id": "missing"})));
        let err = engine.process_request(&req, &ctx).await.unwrap_err();
        assert_eq!(err.kind, mcp_core::ErrorKind::InvalidParams);
    }
}
