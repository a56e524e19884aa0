//! Shared helpers for the `#[mcp_tool]` / `#[mcp_resource]` / `#[mcp_prompt]`
//! attribute macros: doc-comment extraction, naming, and token emission for
//! the metadata `mcp-attrs::parse_doc_block` hands back.

use std::collections::HashMap;

use mcp_protocol::{ParamType, PromptArgument, ToolParameter};
use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Attribute, Token};

/// Parse `name = "foo", uri = "bar"`-style attribute arguments into a
/// lookup table. Unknown keys are left for the caller to ignore or reject.
pub fn parse_attr_args(attr: proc_macro2::TokenStream) -> HashMap<String, String> {
    let parser = Punctuated::<syn::MetaNameValue, Token![,]>::parse_terminated;
    let Ok(pairs) = parser.parse2(attr) else {
        return HashMap::new();
    };
    pairs
        .into_iter()
        .filter_map(|nv| {
            let key = nv.path.get_ident()?.to_string();
            let syn::Expr::Lit(expr_lit) = nv.value else {
                return None;
            };
            let syn::Lit::Str(s) = expr_lit.lit else {
                return None;
            };
            Some((key, s.value()))
        })
        .collect()
}

/// Join a function's `#[doc = "..."]` attributes back into the
/// newline-separated text `mcp_attrs::parse_doc_block` expects — the same
/// shape rustdoc gives the compiler for a `///` comment block.
pub fn extract_doc(attrs: &[Attribute]) -> String {
    let mut lines = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let syn::Meta::NameValue(nv) = &attr.meta {
            if let syn::Expr::Lit(expr_lit) = &nv.value {
                if let syn::Lit::Str(s) = &expr_lit.lit {
                    lines.push(s.value().trim().to_string());
                }
            }
        }
    }
    lines.join("\n")
}

/// `add_two_numbers` -> `AddTwoNumbers`.
pub fn pascal_case(ident: &str) -> String {
    ident
        .split('_')
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// `add_two_numbers` -> `add-two-numbers` (spec.md §4.1 default naming),
/// used when no explicit name was supplied by the attribute or an
/// `@mcp_tool`/`@mcp_prompt` doc annotation.
pub fn kebab_case(ident: &str) -> String {
    ident.replace('_', "-")
}

fn param_type_tokens(param_type: &ParamType) -> TokenStream {
    match param_type {
        ParamType::String => quote! { mcp_protocol::ParamType::String },
        ParamType::Number => quote! { mcp_protocol::ParamType::Number },
        ParamType::Integer => quote! { mcp_protocol::ParamType::Integer },
        ParamType::Boolean => quote! { mcp_protocol::ParamType::Boolean },
        ParamType::Array => quote! { mcp_protocol::ParamType::Array },
        ParamType::Object => quote! { mcp_protocol::ParamType::Object },
    }
}

/// Emit one `ToolParameter::new(...)` construction expression, baking in
/// whatever `@mcp_param` options were present in the doc block.
pub fn tool_parameter_tokens(param: &ToolParameter) -> TokenStream {
    let name = &param.name;
    let description = &param.description;
    let type_tokens = param_type_tokens(&param.param_type);

    let mut expr = quote! {
        mcp_protocol::ToolParameter::new(#name, #type_tokens, #description)
    };
    if !param.required {
        expr = quote! { (#expr).optional() };
    }
    if let Some(default) = &param.default {
        let json = default.to_string();
        expr = quote! {
            (#expr).with_default(
                serde_json::from_str(#json).expect("macro-embedded default is valid JSON")
            )
        };
    }
    if let Some(values) = &param.enum_values {
        let json = serde_json::Value::Array(values.clone()).to_string();
        expr = quote! {
            (#expr).with_enum(
                serde_json::from_str(#json).expect("macro-embedded enum is valid JSON")
            )
        };
    }
    expr
}

/// Emit one `PromptArgument::new(...)` construction expression.
pub fn prompt_argument_tokens(arg: &PromptArgument) -> TokenStream {
    let name = &arg.name;
    let description = &arg.description;
    let required = arg.required;
    quote! { mcp_protocol::PromptArgument::new(#name, #description, #required) }
}
