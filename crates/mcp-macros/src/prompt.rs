//! `#[mcp_prompt]`: wraps a free async fn as a `Prompt` (spec.md §3, §4.1).
//!
//! Expects `async fn name(args: serde_json::Value, ctx: &mcp_core::Context)
//! -> Result<mcp_protocol::PromptBody, mcp_core::HandlerFailure>`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemFn;

use crate::common::{extract_doc, kebab_case, parse_attr_args, pascal_case, prompt_argument_tokens};

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

    let struct_ident = format_ident!("{}Prompt", pascal_case(&fn_name));

    let description = if !metadata.description.is_empty() {
        metadata.description.clone()
    } else {
        args.get("description").cloned().unwrap_or_else(|| format!("Prompt implemented by {fn_name}"))
    };

    let arg_tokens: Vec<_> = metadata.arguments.iter().map(prompt_argument_tokens).collect();

    quote! {
        #item_fn

        #[derive(Debug, Default)]
        pub struct #struct_ident;

        #[async_trait::async_trait]
        impl mcp_protocol::Prompt for #struct_ident {
            fn name(&self) -> String {
                #name.to_string()
            }

            fn description(&self) -> String {
                #description.to_string()
            }

            fn arguments(&self) -> Vec<mcp_protocol::PromptArgument> {
                vec![#(#arg_tokens),*]
            }

            async fn get(
                &self,
                args: serde_json::Value,
                ctx: &mcp_core::Context,
            ) -> Result<mcp_protocol::PromptBody, mcp_core::HandlerFailure> {
                #fn_ident(args, ctx).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_with_arguments_from_doc_block() {
        let attr = quote! {};
        let item = quote! {
            /// Greets a user by name.
            ///
            /// @mcp_prompt greeting
            /// @mcp_arg name [required: true]
            async fn greeting(args: serde_json::Value, ctx: &mcp_core::Context) -> Result<mcp_protocol::PromptBody, mcp_core::HandlerFailure> {
                unimplemented!()
            }
        };
        let expanded = expand(attr, item).to_string();
        assert!(expanded.contains("\"greeting\""));
        assert!(expanded.contains("GreetingPrompt"));
    }
}
