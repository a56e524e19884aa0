//! Default server capabilities payload (spec.md §4.4).

use serde_json::{json, Value};

/// Information about this server instance, echoed back on `initialize`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ServerInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// The capability payload returned in the `initialize` response when no
/// handler-module override is configured.
///
/// The shape is fixed by spec.md §4.4 rather than derived from the
/// registry's actual contents: a client is told dynamic discovery is
/// available (`dynamic: true`) and is expected to call `tools/list`,
/// `resources/list`, `prompts/list` separately.
#[must_use]
pub fn default_capabilities() -> Value {
    json!({
        "resources": {
            "listResources": {"dynamic": true},
            "getResource": {"dynamic": true},
        },
        "prompts": {
            "listPrompts": {"dynamic": true},
            "getPrompt": {"dynamic": true},
        },
        "tools": {
            "listTools": {"dynamic": true},
            "executeTool": {"dynamic": true},
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capabilities_advertise_dynamic_discovery() {
        let caps = default_capabilities();
        assert_eq!(caps["tools"]["listTools"]["dynamic"], json!(true));
        assert_eq!(caps["resources"]["getResource"]["dynamic"], json!(true));
        assert_eq!(caps["prompts"]["listPrompts"]["dynamic"], json!(true));
    }
}
