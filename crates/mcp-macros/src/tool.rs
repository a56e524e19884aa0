//! `#[mcp_tool]`: wraps a free async fn as a `Tool` (spec.md §3, §4.1).
//!
//! Expects `async fn name(params: serde_json::Value, ctx: &mcp_core::Context)
//! -> Result<serde_json::Value, mcp_core::HandlerFailure>`. Doc comments are
//! parsed with the same `@mcp_param`/`@mcp_tool` grammar the runtime
//! attribute-discovery path understands (`mcp-attrs`), so a tool registered
//! via this macro and one registered by scanning doc comments at runtime
//! produce identical metadata.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemFn;

use crate::common::{extract_doc, kebab_case, parse_attr_args, pascal_case, tool_parameter_tokens};

pub fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item_fn: ItemFn = match syn::parse2(item) {
        Ok(f) => f,
        Err(err) => return err.to_compile_error(),
    };

    let fn_ident = &item_fn.sig.ident;
    let fn_name = fn_ident.to_string();
    let args = parse_attr_args(attr);

    let doc = extract_doc(&item_fn.attrs);
    let metadata = mcp_attrs::parse_doc_block(&doc, fn_name.clone());

    let name = args
        .get("name")
        .cloned()
        .or(metadata.identifier.clone())
        .unwrap_or_else(|| kebab_case(&fn_name));

    let struct_ident = format_ident!("{}Tool", pascal_case(&fn_name));

    let description = if !metadata.description.is_empty() {
        metadata.description.clone()
    } else {
        args.get("description").cloned().unwrap_or_else(|| format!("Tool implemented by {fn_name}"))
    };

    let param_tokens: Vec<_> = metadata.parameters.iter().map(tool_parameter_tokens).collect();

    quote! {
        #item_fn

        #[derive(Debug, Default)]
        pub struct #struct_ident;

        #[async_trait::async_trait]
        impl mcp_protocol::Tool for #struct_ident {
            fn name(&self) -> String {
                #name.to_string()
            }

            fn description(&self) -> String {
                #description.to_string()
            }

            fn parameters(&self) -> Vec<mcp_protocol::ToolParameter> {
                vec![#(#param_tokens),*]
            }

            async fn handle(
                &self,
                params: serde_json::Value,
                ctx: &mcp_core::Context,
            ) -> Result<serde_json::Value, mcp_core::HandlerFailure> {
                #fn_ident(params, ctx).await
            }
        }
    }
}
