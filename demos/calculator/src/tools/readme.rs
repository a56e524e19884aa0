//! The `docs://readme` resource (scenario 6): content keyed by a `version`
//! request param, generated from a free function via `#[mcp_resource]`.

use mcp::prelude::*;
use serde_json::Value;

/// The project readme, rendered for a requested version.
///
/// @mcp_resource docs://readme
/// @mcp_mime_type text/markdown
#[mcp::mcp_resource]
pub async fn readme(params: Value, _ctx: &Context) -> Result<Value, HandlerFailure> {
    let version = params.get("version").and_then(Value::as_str).unwrap_or("1.0");
    let body = format!(
        "# Version {version}\n\nA worked example MCP server exposing a `calculate` tool, a \
         `counter` streaming tool, and this resource."
    );
    Ok(Value::String(body))
}
