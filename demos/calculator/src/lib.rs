//! Worked example tying the whole request engine together (spec.md §8
//! "Scenarios"): a `calculate` tool, a streaming `counter` tool, and a
//! `docs://readme` resource, assembled behind the facade's `ServerBuilder`
//! and servable over any of the four transports.

pub mod tools;

use std::sync::Arc;

use mcp::prelude::*;
use tools::calculate::CalculateTool;
use tools::counter::CounterTool;
use tools::readme::ReadmeResource;

/// Build the engine the demo binary and its integration tests both exercise.
#[must_use]
pub fn build_engine_with_prefix(module_prefix: impl Into<String>) -> Arc<Engine> {
    ServerBuilder::new("mcp-demo-calculator", env!("CARGO_PKG_VERSION"))
        .with_module_prefix(module_prefix)
        .tool(Arc::new(CalculateTool))
        .expect("calculate has a non-empty name")
        .tool(Arc::new(CounterTool))
        .expect("counter has a non-empty name")
        .resource(Arc::new(ReadmeResource))
        .expect("docs://readme has a non-empty uri")
        .build()
}

/// Build the engine with the default `mcp/` module prefix.
#[must_use]
pub fn build_engine() -> Arc<Engine> {
    build_engine_with_prefix("mcp/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(method: &str, id: Option<serde_json::Value>, params: Option<serde_json::Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
            id,
        }
    }

    /// Scenario 1: uninitialized guard.
    #[tokio::test]
    async fn uninitialized_guard_rejects_tools_list() {
        let engine = build_engine();
        let ctx = Context::new("c1", Some(json!("1")));
        let err = engine
            .process_request(&request("tools/list", Some(json!("1")), None), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotInitialized);
        assert!(err.message.contains("Server not initialized"));
    }

    async fn initialize(engine: &Engine, ctx: &Context) {
        engine
            .process_request(&request("initialize", Some(json!("0")), Some(json!({}))), ctx)
            .await
            .unwrap();
    }

    /// Scenario 2: calculator add.
    #[tokio::test]
    async fn calculator_add_returns_sum() {
        let engine = build_engine();
        let ctx = Context::new("c1", Some(json!("1")));
        initialize(&engine, &ctx).await;

        let req = request(
            "tools/execute",
            Some(json!("1")),
            Some(json!({"id": "calculate", "params": {"operation": "add", "x": 2, "y": 3}})),
        );
        let result = engine.process_request(&req, &ctx).await.unwrap().unwrap();
        assert_eq!(result, json!(5));
    }

    /// Scenario 3: divide by zero.
    #[tokio::test]
    async fn calculator_divide_by_zero_is_internal_error() {
        let engine = build_engine();
        let ctx = Context::new("c1", Some(json!("1")));
        initialize(&engine, &ctx).await;

        let req = request(
            "tools/execute",
            Some(json!("1")),
            Some(json!({"id": "calculate", "params": {"operation": "divide", "x": 6, "y": 0}})),
        );
        let err = engine.process_request(&req, &ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, "Cannot divide by zero");
    }

    /// Scenario 6: resource read with params.
    #[tokio::test]
    async fn readme_resource_renders_requested_version() {
        let engine = build_engine();
        let ctx = Context::new("c1", Some(json!("1")));
        initialize(&engine, &ctx).await;

        let req = request(
            "resources/get",
            Some(json!("1")),
            Some(json!({"id": "docs://readme", "version": "2.0"})),
        );
        let result = engine.process_request(&req, &ctx).await.unwrap().unwrap();
        assert!(result["content"].as_str().unwrap().starts_with("# Version 2.0\n"));
    }

    #[tokio::test]
    async fn tools_list_includes_both_registered_tools() {
        let engine = build_engine();
        let ctx = Context::new("c1", Some(json!("1")));
        initialize(&engine, &ctx).await;

        let result = engine
            .process_request(&request("tools/list", Some(json!("1")), None), &ctx)
            .await
            .unwrap()
            .unwrap();
        let ids: Vec<_> = result["tools"].as_array().unwrap().iter().map(|t| t["id"].clone()).collect();
        assert!(ids.contains(&json!("calculate")));
        assert!(ids.contains(&json!("counter")));
    }
}
