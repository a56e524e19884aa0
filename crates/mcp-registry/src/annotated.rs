//! Wrappers that let a handler registered via [`mcp_attrs::ParsedMetadata`]
//! present the identity/description/schema the annotation parser extracted,
//! while still delegating execution to the underlying handler.

use async_trait::async_trait;
use mcp_core::{Context, HandlerFailure};
use mcp_attrs::ParsedMetadata;
use mcp_protocol::{Prompt, PromptArgument, PromptBody, Resource, Tool, ToolParameter};
use serde_json::Value;

pub struct AnnotatedTool {
    inner: std::sync::Arc<dyn Tool>,
    metadata: ParsedMetadata,
}

impl AnnotatedTool {
    pub fn new(inner: std::sync::Arc<dyn Tool>, metadata: ParsedMetadata) -> Self {
        Self { inner, metadata }
    }
}

#[async_trait]
impl Tool for AnnotatedTool {
    fn name(&self) -> String {
        self.metadata
            .identifier
            .clone()
            .unwrap_or_else(|| self.inner.name())
    }

    fn description(&self) -> String {
        if self.metadata.description.is_empty() {
            self.inner.description()
        } else {
            self.metadata.description.clone()
        }
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        if self.metadata.parameters.is_empty() {
            self.inner.parameters()
        } else {
            self.metadata.parameters.clone()
        }
    }

    async fn handle(&self, params: Value, ctx: &Context) -> Result<Value, HandlerFailure> {
        self.inner.handle(params, ctx).await
    }

    async fn handle_stream(
        &self,
        params: Value,
        ctx: &Context,
        emit: &dyn mcp_protocol::ProgressEmitter,
    ) -> Result<Value, HandlerFailure> {
        self.inner.handle_stream(params, ctx, emit).await
    }

    fn supports_streaming(&self) -> bool {
        self.inner.supports_streaming()
    }
}

pub struct AnnotatedResource {
    inner: std::sync::Arc<dyn Resource>,
    metadata: ParsedMetadata,
}

impl AnnotatedResource {
    pub fn new(inner: std::sync::Arc<dyn Resource>, metadata: ParsedMetadata) -> Self {
        Self { inner, metadata }
    }
}

#[async_trait]
impl Resource for AnnotatedResource {
    fn uri(&self) -> String {
        self.metadata
            .identifier
            .clone()
            .unwrap_or_else(|| self.inner.uri())
    }

    fn description(&self) -> String {
        if self.metadata.description.is_empty() {
            self.inner.description()
        } else {
            self.metadata.description.clone()
        }
    }

    fn mime_type(&self) -> String {
        self.metadata
            .mime_type
            .clone()
            .unwrap_or_else(|| self.inner.mime_type())
    }

    async fn read(&self, params: Value, ctx: &Context) -> Result<Value, HandlerFailure> {
        self.inner.read(params, ctx).await
    }
}

pub struct AnnotatedPrompt {
    inner: std::sync::Arc<dyn Prompt>,
    metadata: ParsedMetadata,
}

impl AnnotatedPrompt {
    pub fn new(inner: std::sync::Arc<dyn Prompt>, metadata: ParsedMetadata) -> Self {
        Self { inner, metadata }
    }
}

#[async_trait]
impl Prompt for AnnotatedPrompt {
    fn name(&self) -> String {
        self.metadata
            .identifier
            .clone()
            .unwrap_or_else(|| self.inner.name())
    }

    fn description(&self) -> String {
        if self.metadata.description.is_empty() {
            self.inner.description()
        } else {
            self.metadata.description.clone()
        }
    }

    fn arguments(&self) -> Vec<PromptArgument> {
        if self.metadata.arguments.is_empty() {
            self.inner.arguments()
        } else {
            self.metadata.arguments.clone()
        }
    }

    async fn get(&self, args: Value, ctx: &Context) -> Result<PromptBody, HandlerFailure> {
        self.inner.get(args, ctx).await
    }
}
