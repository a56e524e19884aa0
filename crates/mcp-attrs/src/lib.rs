//! Parses the `@mcp_tool`/`@mcp_resource`/`@mcp_prompt` line-annotation
//! grammar out of documentation blocks attached to handler units, for
//! discovery-driven registration (spec.md §4.2). Shared by the runtime
//! discovery path and, at compile time, by `mcp-macros`.

#![warn(missing_debug_implementations, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod parse;
mod value;

pub use parse::{parse_doc_block, Kind, ParsedMetadata};
pub use value::{parse_options, parse_value, split_top_level};
