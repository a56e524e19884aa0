//! Immutable server configuration (spec.md §3 "Server State").

/// Config fixed for the lifetime of an [`crate::Engine`]: display metadata
/// and the method-name prefix transports strip before dispatch.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub display_name: String,
    pub version: String,
    /// Prefix (e.g. `"mcp/"`) a bare method name may optionally carry.
    pub module_prefix: String,
}

impl ServerConfig {
    #[must_use]
    pub fn new(display_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            version: version.into(),
            module_prefix: "mcp/".to_string(),
        }
    }

    #[must_use]
    pub fn with_module_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.module_prefix = prefix.into();
        self
    }
}
