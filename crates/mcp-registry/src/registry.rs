//! The process-wide component catalog (spec.md §4.3).

use std::sync::Arc;

use indexmap::IndexMap;
use mcp_protocol::{Prompt, Resource, Tool};
use parking_lot::RwLock;

use crate::error::RegistryError;

type ToolMap = IndexMap<String, Arc<dyn Tool>>;
type ResourceMap = IndexMap<String, Arc<dyn Resource>>;
type PromptMap = IndexMap<String, Arc<dyn Prompt>>;

/// Process-wide catalog of registered tools, resources, and prompts.
///
/// Writes serialize through a single lock per map (spec.md §4.3
/// "single-writer discipline"); reads take a snapshot clone and never block
/// a concurrent writer for longer than the clone itself.
#[derive(Default)]
pub struct Registry {
    tools: RwLock<ToolMap>,
    resources: RwLock<ResourceMap>,
    prompts: RwLock<PromptMap>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("tools", &self.tools.read().len())
            .field("resources", &self.resources.read().len())
            .field("prompts", &self.prompts.read().len())
            .finish()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Last-registered wins on a duplicate name
    /// (spec.md §3 "Registry State").
    pub fn register_tool(&self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        let name = tool.name();
        if name.is_empty() {
            return Err(RegistryError::InvalidTool);
        }
        self.tools.write().insert(name, tool);
        Ok(())
    }

    pub fn register_resource(&self, resource: Arc<dyn Resource>) -> Result<(), RegistryError> {
        let uri = resource.uri();
        if uri.is_empty() {
            return Err(RegistryError::InvalidResource);
        }
        self.resources.write().insert(uri, resource);
        Ok(())
    }

    pub fn register_prompt(&self, prompt: Arc<dyn Prompt>) -> Result<(), RegistryError> {
        let name = prompt.name();
        if name.is_empty() {
            return Err(RegistryError::InvalidPrompt);
        }
        self.prompts.write().insert(name, prompt);
        Ok(())
    }

    /// Snapshot of all registered tools, insertion order preserved.
    #[must_use]
    pub fn get_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.read().values().cloned().collect()
    }

    #[must_use]
    pub fn get_resources(&self) -> Vec<Arc<dyn Resource>> {
        self.resources.read().values().cloned().collect()
    }

    #[must_use]
    pub fn get_prompts(&self) -> Vec<Arc<dyn Prompt>> {
        self.prompts.read().values().cloned().collect()
    }

    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.read().get(name).cloned()
    }

    #[must_use]
    pub fn get_resource(&self, uri: &str) -> Option<Arc<dyn Resource>> {
        self.resources.read().get(uri).cloned()
    }

    #[must_use]
    pub fn get_prompt(&self, name: &str) -> Option<Arc<dyn Prompt>> {
        self.prompts.read().get(name).cloned()
    }
}
