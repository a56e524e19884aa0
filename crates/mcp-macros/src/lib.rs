//! Attribute macros that generate `Tool`/`Resource`/`Prompt` registration
//! wrappers from a free async fn and its doc comments (spec.md §9 design
//! note: compile-time metadata generation reusing the same `@mcp_*` grammar
//! `mcp-attrs` parses at runtime, rather than per-method trait-impl codegen
//! on an `impl` block).
//!
//! ```ignore
//! /// Adds two numbers together.
//! ///
//! /// @mcp_tool add
//! /// @mcp_param a number [required: true]
//! /// @mcp_param b number [required: true]
//! #[mcp_macros::mcp_tool]
//! async fn add(params: serde_json::Value, ctx: &mcp_core::Context) -> Result<serde_json::Value, mcp_core::HandlerFailure> {
//!     let a = params["a"].as_f64().unwrap_or(0.0);
//!     let b = params["b"].as_f64().unwrap_or(0.0);
//!     Ok(serde_json::json!(a + b))
//! }
//! ```
//!
//! generates `add` unchanged plus a unit struct `AddTool` implementing
//! `mcp_protocol::Tool`, ready to hand to `Registry::register_tool`.

mod common;
mod prompt;
mod resource;
mod tool;

use proc_macro::TokenStream;

#[proc_macro_attribute]
pub fn mcp_tool(attr: TokenStream, item: TokenStream) -> TokenStream {
    tool::expand(attr.into(), item.into()).into()
}

#[proc_macro_attribute]
pub fn mcp_resource(attr: TokenStream, item: TokenStream) -> TokenStream {
    resource::expand(attr.into(), item.into()).into()
}

#[proc_macro_attribute]
pub fn mcp_prompt(attr: TokenStream, item: TokenStream) -> TokenStream {
    prompt::expand(attr.into(), item.into()).into()
}
