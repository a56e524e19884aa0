//! `#[mcp_resource(uri = "...")]`: wraps a free async fn as a `Resource`
//! (spec.md §3, §4.1).
//!
//! Expects `async fn name(params: serde_json::Value, ctx: &mcp_core::Context)
//! -> Result<serde_json::Value, mcp_core::HandlerFailure>`. The URI must be
//! supplied explicitly — either via the attribute or an `@mcp_resource` doc
//! annotation — since, unlike a tool name, a resource has no sensible
//! default (spec.md invariant 2).

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemFn;

use crate::common::{extract_doc, parse_attr_args, pascal_case};

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

    let Some(uri) = args.get("uri").cloned().or(metadata.identifier.clone()) else {
        return syn::Error::new_spanned(
            fn_ident,
            "#[mcp_resource] requires a uri: either `#[mcp_resource(uri = \"...\")]` or an `@mcp_resource <uri>` doc annotation",
        )
        .to_compile_error();
    };

    let struct_ident = format_ident!("{}Resource", pascal_case(&fn_name));

    let description = if !metadata.description.is_empty() {
        metadata.description.clone()
    } else {
        args.get("description").cloned().unwrap_or_else(|| format!("Resource implemented by {fn_name}"))
    };

    let mime_type = args.get("mime_type").cloned().or(metadata.mime_type.clone()).unwrap_or_else(|| "text/plain".to_string());

    quote! {
        #item_fn

        #[derive(Debug, Default)]
        pub struct #struct_ident;

        #[async_trait::async_trait]
        impl mcp_protocol::Resource for #struct_ident {
            fn uri(&self) -> String {
                #uri.to_string()
            }

            fn description(&self) -> String {
                #description.to_string()
            }

            fn mime_type(&self) -> String {
                #mime_type.to_string()
            }

            async fn read(
                &self,
                params: serde_json::Value,
                ctx: &mcp_core::Context,
            ) -> Result<serde_json::Value, mcp_core::HandlerFailure> {
                #fn_ident(params, ctx).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_with_uri_from_attribute() {
        let attr = quote! { uri = "docs://readme" };
        let item = quote! {
            /// The readme contents.
            async fn readme(params: serde_json::Value, ctx: &mcp_core::Context) -> Result<serde_json::Value, mcp_core::HandlerFailure> {
                Ok(params)
            }
        };
        let expanded = expand(attr, item).to_string();
        assert!(expanded.contains("docs://readme"));
        assert!(expanded.contains("ReadmeResource"));
    }

    #[test]
    fn missing_uri_is_a_compile_error() {
        let attr = quote! {};
        let item = quote! {
            async fn readme(params: serde_json::Value, ctx: &mcp_core::Context) -> Result<serde_json::Value, mcp_core::HandlerFailure> {
                Ok(params)
            }
        };
        let expanded = expand(attr, item).to_string();
        assert!(expanded.contains("compile_error"));
    }
}
