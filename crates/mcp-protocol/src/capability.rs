//! Capability contracts (spec.md §3, §4.1): Tool, Resource, Prompt.
//!
//! These are plain `async_trait` traits with default-method derivations for
//! identity/description/schema, the way the teacher separates the handler
//! contract (`turbomcp-server::handlers::traits::ToolHandler`) from the
//! ergonomic `#[tool]` macro sugar built on top of it. No macro is required
//! to satisfy a contract here — a type implements `Tool` directly.

use async_trait::async_trait;
use mcp_core::{Context, HandlerFailure};
use serde_json::Value;

/// A JSON Schema type tag for a tool parameter or prompt argument.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// One declared tool parameter (spec.md §3).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub description: String,
    pub required: bool,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ToolParameter {
    /// Construct a required parameter with no enum/default.
    #[must_use]
    pub fn new(name: impl Into<String>, param_type: ParamType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
            required: true,
            enum_values: None,
            default: None,
        }
    }

    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    #[must_use]
    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// A streaming-progress emitter passed to `Tool::handle_stream`.
///
/// Writes go straight to the invoking connection's outbound channel
/// (spec.md §9 "Streaming terminal emission": never to the task's own
/// mailbox). Constructed by `mcp-server`; tools only ever see this trait.
#[async_trait]
pub trait ProgressEmitter: Send + Sync {
    /// Send one `progress` notification for this invocation.
    async fn emit(&self, progress: Value) -> Result<(), HandlerFailure>;
}

/// An executable function a client may invoke by name (spec.md §3 "Tool").
#[async_trait]
pub trait Tool: Send + Sync {
    /// Short, unique identifier. Default: kebab-case of the implementing
    /// type's name (spec.md §4.1).
    fn name(&self) -> String {
        crate::naming::kebab_case_type_name::<Self>()
    }

    /// Human-readable description. Default: `"Tool implemented by <T>"`.
    fn description(&self) -> String {
        format!("Tool implemented by {}", std::any::type_name::<Self>())
    }

    /// Ordered parameter declarations. Default: none.
    fn parameters(&self) -> Vec<ToolParameter> {
        Vec::new()
    }

    /// Execute the tool for a single, non-streaming invocation.
    async fn handle(&self, params: Value, ctx: &Context) -> Result<Value, HandlerFailure>;

    /// Execute the tool as a streaming invocation, emitting zero or more
    /// progress notifications before returning the terminal value.
    ///
    /// Tools that don't support streaming simply don't override this —
    /// the engine checks `supports_streaming()` before ever calling it.
    async fn handle_stream(
        &self,
        params: Value,
        ctx: &Context,
        emit: &dyn ProgressEmitter,
    ) -> Result<Value, HandlerFailure> {
        let _ = emit;
        self.handle(params, ctx).await
    }

    /// Whether `handle_stream` has a real implementation. The engine only
    /// takes the streaming path (spec.md §4.4) when this is `true` *and*
    /// the context asked for streaming.
    fn supports_streaming(&self) -> bool {
        false
    }
}

/// An addressable readable datum identified by a URI (spec.md §3 "Resource").
#[async_trait]
pub trait Resource: Send + Sync {
    /// Scheme-qualified URI, e.g. `docs://readme`. No default — identity is
    /// mandatory for a resource (spec.md invariant 2).
    fn uri(&self) -> String;

    fn name(&self) -> String {
        crate::naming::kebab_case_type_name::<Self>()
    }

    fn description(&self) -> String {
        format!("Resource implemented by {}", std::any::type_name::<Self>())
    }

    fn mime_type(&self) -> String {
        "text/plain".to_string()
    }

    /// Read the resource's content, optionally parameterized.
    async fn read(&self, params: Value, ctx: &Context) -> Result<Value, HandlerFailure>;
}

/// A role in a prompt message (spec.md §3 "Prompt").
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One message produced by `Prompt::get`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

/// The full result of materializing a prompt.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PromptBody {
    pub title: String,
    pub messages: Vec<PromptMessage>,
}

/// One declared prompt argument.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

impl PromptArgument {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
        }
    }
}

/// A server-exposed message template a client may materialize by name
/// (spec.md §3 "Prompt").
#[async_trait]
pub trait Prompt: Send + Sync {
    fn name(&self) -> String {
        crate::naming::kebab_case_type_name::<Self>()
    }

    fn description(&self) -> String {
        format!("Prompt implemented by {}", std::any::type_name::<Self>())
    }

    fn arguments(&self) -> Vec<PromptArgument> {
        Vec::new()
    }

    async fn get(&self, args: Value, ctx: &Context) -> Result<PromptBody, HandlerFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_core::Context;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        async fn handle(&self, params: Value, _ctx: &Context) -> Result<Value, HandlerFailure> {
            Ok(params)
        }
    }

    #[tokio::test]
    async fn default_name_is_kebab_case_of_type() {
        let tool = Echo;
        assert_eq!(tool.name(), "echo");
        assert!(tool.description().contains("Echo"));
        assert!(tool.parameters().is_empty());
    }

    #[tokio::test]
    async fn default_handle_stream_falls_back_to_handle() {
        struct NoopEmitter;
        #[async_trait]
        impl ProgressEmitter for NoopEmitter {
            async fn emit(&self, _progress: Value) -> Result<(), HandlerFailure> {
                Ok(())
            }
        }

        let tool = Echo;
        let ctx = Context::new("client", Some(json!(1)));
        let result = tool
            .handle_stream(json!({"x": 1}), &ctx, &NoopEmitter)
            .await
            .unwrap();
        assert_eq!(result, json!({"x": 1}));
        assert!(!tool.supports_streaming());
    }
}
