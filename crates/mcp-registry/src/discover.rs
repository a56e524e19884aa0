//! Bulk discovery (spec.md §4.3 `discover_components`).
//!
//! Rust has no runtime reflection over "loaded code units", so discovery
//! here operates over an explicit candidate list the caller assembles at
//! startup (typically: every handler type a build script or `inventory`-style
//! collection knows about) rather than scanning a module table.

use std::sync::Arc;

use mcp_attrs::ParsedMetadata;
use mcp_protocol::{Prompt, Resource, Tool};

use crate::annotated::{AnnotatedPrompt, AnnotatedResource, AnnotatedTool};
use crate::registry::Registry;

/// One unit offered to discovery: either it already satisfies a capability
/// contract directly, or it's paired with attribute-parsed metadata
/// (spec.md §4.2/§4.3 "attribute-annotated" set).
pub enum Candidate {
    Tool(Arc<dyn Tool>),
    Resource(Arc<dyn Resource>),
    Prompt(Arc<dyn Prompt>),
    AnnotatedTool(Arc<dyn Tool>, ParsedMetadata),
    AnnotatedResource(Arc<dyn Resource>, ParsedMetadata),
    AnnotatedPrompt(Arc<dyn Prompt>, ParsedMetadata),
}

impl Candidate {
    fn identifier(&self) -> String {
        match self {
            Self::Tool(t) => t.name(),
            Self::Resource(r) => r.uri(),
            Self::Prompt(p) => p.name(),
            Self::AnnotatedTool(t, m) => m.identifier.clone().unwrap_or_else(|| t.name()),
            Self::AnnotatedResource(r, m) => m.identifier.clone().unwrap_or_else(|| r.uri()),
            Self::AnnotatedPrompt(p, m) => m.identifier.clone().unwrap_or_else(|| p.name()),
        }
    }
}

/// Newly registered identifiers from one `discover_components` call.
#[derive(Debug, Default, Clone)]
pub struct DiscoveryReport {
    pub tools: Vec<String>,
    pub resources: Vec<String>,
    pub prompts: Vec<String>,
}

/// Enumerate `candidates`, keep those whose identifier starts with `prefix`
/// (or all, if `prefix` is absent), register each, and report what was new.
pub fn discover_components(
    registry: &Registry,
    candidates: Vec<Candidate>,
    prefix: Option<&str>,
) -> DiscoveryReport {
    let mut report = DiscoveryReport::default();

    for candidate in candidates {
        let id = candidate.identifier();
        if let Some(prefix) = prefix {
            if !id.starts_with(prefix) {
                continue;
            }
        }
        if id.is_empty() {
            tracing::warn!("discovery skipped candidate with empty identifier");
            continue;
        }

        match candidate {
            Candidate::Tool(t) => {
                if registry.register_tool(t).is_ok() {
                    report.tools.push(id);
                }
            }
            Candidate::Resource(r) => {
                if registry.register_resource(r).is_ok() {
                    report.resources.push(id);
                }
            }
            Candidate::Prompt(p) => {
                if registry.register_prompt(p).is_ok() {
                    report.prompts.push(id);
                }
            }
            Candidate::AnnotatedTool(t, m) => {
                let wrapped: Arc<dyn Tool> = Arc::new(AnnotatedTool::new(t, m));
                if registry.register_tool(wrapped).is_ok() {
                    report.tools.push(id);
                }
            }
            Candidate::AnnotatedResource(r, m) => {
                let wrapped: Arc<dyn Resource> = Arc::new(AnnotatedResource::new(r, m));
                if registry.register_resource(wrapped).is_ok() {
                    report.resources.push(id);
                }
            }
            Candidate::AnnotatedPrompt(p, m) => {
                let wrapped: Arc<dyn Prompt> = Arc::new(AnnotatedPrompt::new(p, m));
                if registry.register_prompt(wrapped).is_ok() {
                    report.prompts.push(id);
                }
            }
        }
    }

    report
}

/// Register one attribute-annotated component directly (spec.md §4.3
/// `register_attribute_component`), bypassing the bulk `discover_components`
/// prefix filter.
pub fn register_attribute_component(registry: &Registry, candidate: Candidate) -> bool {
    let report = discover_components(registry, vec![candidate], None);
    !report.tools.is_empty() || !report.resources.is_empty() || !report.prompts.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mcp_core::{Context, HandlerFailure};
    use serde_json::Value;

    struct Raw;

    #[async_trait]
    impl Tool for Raw {
        fn name(&self) -> String {
            "raw-tool".to_string()
        }
        async fn handle(&self, params: Value, _ctx: &Context) -> Result<Value, HandlerFailure> {
            Ok(params)
        }
    }

    #[test]
    fn prefix_filter_excludes_non_matching_candidates() {
        let registry = Registry::new();
        let candidates = vec![
            Candidate::Tool(Arc::new(Raw)),
        ];
        let report = discover_components(&registry, candidates, Some("other-"));
        assert!(report.tools.is_empty());
        assert!(registry.get_tools().is_empty());
    }

    #[test]
    fn matching_prefix_registers_candidate() {
        let registry = Registry::new();
        let candidates = vec![Candidate::Tool(Arc::new(Raw))];
        let report = discover_components(&registry, candidates, Some("raw-"));
        assert_eq!(report.tools, vec!["raw-tool".to_string()]);
    }

    #[test]
    fn annotated_candidate_uses_metadata_identifier() {
        let registry = Registry::new();
        let meta = mcp_attrs::parse_doc_block(
            "A renamed tool.\n\n@mcp_tool renamed\n",
            "handlers::raw",
        );
        let candidates = vec![Candidate::AnnotatedTool(Arc::new(Raw), meta)];
        let report = discover_components(&registry, candidates, None);
        assert_eq!(report.tools, vec!["renamed".to_string()]);
        assert!(registry.get_tool("renamed").is_some());
    }
}
