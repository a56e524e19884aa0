//! The `@mcp_*` line grammar parser (spec.md §4.2).

use mcp_protocol::{ParamType, PromptArgument, ToolParameter};
use serde_json::Value;

use crate::value::parse_options;

/// Which capability kind a doc block declared, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Tool,
    Resource,
    Prompt,
}

/// The metadata record extracted from one handler unit's documentation
/// (spec.md §4.2 "Output").
#[derive(Debug, Clone, Default)]
pub struct ParsedMetadata {
    pub kind: Option<Kind>,
    /// The tool/prompt name, or the resource uri.
    pub identifier: Option<String>,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
    pub arguments: Vec<PromptArgument>,
    pub mime_type: Option<String>,
    /// Opaque reference to the handler unit this metadata was parsed for,
    /// threaded through unexamined so the registry can associate metadata
    /// back to the handler that produced it.
    pub handler_ref: String,
}

impl ParsedMetadata {
    #[must_use]
    pub fn is_tool(&self) -> bool {
        self.kind == Some(Kind::Tool)
    }

    #[must_use]
    pub fn is_resource(&self) -> bool {
        self.kind == Some(Kind::Resource)
    }

    #[must_use]
    pub fn is_prompt(&self) -> bool {
        self.kind == Some(Kind::Prompt)
    }

    /// `true` if the doc block declared no capability at all — spec.md
    /// §4.2 "empty doc → empty metadata (unit not discovered)".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
    }
}

fn param_type_from_str(s: &str) -> ParamType {
    match s.to_lowercase().as_str() {
        "number" => ParamType::Number,
        "integer" | "int" => ParamType::Integer,
        "boolean" | "bool" => ParamType::Boolean,
        "array" | "list" => ParamType::Array,
        "object" | "map" => ParamType::Object,
        _ => ParamType::String,
    }
}

fn split_annotation_args(rest: &str) -> (String, Option<String>) {
    match rest.find('[') {
        Some(idx) if rest.trim_end().ends_with(']') => {
            let head = rest[..idx].trim().to_string();
            let bracket = rest[idx + 1..rest.rfind(']').unwrap_or(rest.len())].to_string();
            (head, Some(bracket))
        }
        _ => (rest.trim().to_string(), None),
    }
}

fn apply_param_options(param: ToolParameter, opts: &[(String, Value)]) -> ToolParameter {
    let mut param = param;
    for (key, value) in opts {
        match key.as_str() {
            "required" => param.required = value.as_bool().unwrap_or(param.required),
            "default" => param.default = Some(value.clone()),
            "enum" => {
                if let Some(arr) = value.as_array() {
                    param.enum_values = Some(arr.clone());
                }
            }
            "description" => {
                if let Some(s) = value.as_str() {
                    param.description = s.to_string();
                }
            }
            _ => {}
        }
    }
    param
}

fn apply_arg_options(arg: PromptArgument, opts: &[(String, Value)]) -> PromptArgument {
    let mut arg = arg;
    for (key, value) in opts {
        match key.as_str() {
            "required" => arg.required = value.as_bool().unwrap_or(arg.required),
            "description" => {
                if let Some(s) = value.as_str() {
                    arg.description = s.to_string();
                }
            }
            _ => {}
        }
    }
    arg
}

/// Parse a documentation block into a metadata record.
///
/// Parse failures on individual annotation lines are non-fatal: a malformed
/// line is skipped (with a `tracing::warn!`) and parsing continues, per
/// spec.md §4.2 "Edge cases".
#[must_use]
pub fn parse_doc_block(doc: &str, handler_ref: impl Into<String>) -> ParsedMetadata {
    let mut meta = ParsedMetadata {
        handler_ref: handler_ref.into(),
        ..Default::default()
    };

    meta.description = doc
        .lines()
        .take_while(|line| !line.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    for (lineno, line) in doc.lines().enumerate() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('@') else {
            continue;
        };

        let Some((tag, rest)) = rest.split_once(char::is_whitespace) else {
            tracing::warn!(line = lineno, "malformed mcp annotation line, skipping");
            continue;
        };
        let rest = rest.trim();

        match tag {
            "mcp_tool" => {
                meta.kind = Some(Kind::Tool);
                meta.identifier = Some(rest.to_string());
            }
            "mcp_resource" => {
                meta.kind = Some(Kind::Resource);
                meta.identifier = Some(rest.to_string());
            }
            "mcp_prompt" => {
                meta.kind = Some(Kind::Prompt);
                meta.identifier = Some(rest.to_string());
            }
            "mcp_mime_type" => {
                meta.mime_type = Some(rest.to_string());
            }
            "mcp_param" => match parse_param_line(rest) {
                Some(param) => meta.parameters.push(param),
                None => tracing::warn!(line = lineno, "malformed @mcp_param, skipping"),
            },
            "mcp_arg" => match parse_arg_line(rest) {
                Some(arg) => meta.arguments.push(arg),
                None => tracing::warn!(line = lineno, "malformed @mcp_arg, skipping"),
            },
            _ => {}
        }
    }

    meta
}

fn parse_param_line(rest: &str) -> Option<ToolParameter> {
    let (head, bracket) = split_annotation_args(rest);
    let mut tokens = head.split_whitespace();
    let name = tokens.next()?;
    let type_name = tokens.next()?;

    let param = ToolParameter::new(name, param_type_from_str(type_name), "");
    Some(match bracket {
        Some(opts) => apply_param_options(param, &parse_options(&opts)),
        None => param,
    })
}

fn parse_arg_line(rest: &str) -> Option<PromptArgument> {
    let (head, bracket) = split_annotation_args(rest);
    let name = head.split_whitespace().next()?;

    let arg = PromptArgument::new(name, "", true);
    Some(match bracket {
        Some(opts) => apply_arg_options(arg, &parse_options(&opts)),
        None => arg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_doc_yields_empty_metadata() {
        let meta = parse_doc_block("", "h1");
        assert!(meta.is_empty());
    }

    #[test]
    fn parses_tool_with_description_and_params() {
        let doc = "\
Adds two numbers together.

@mcp_tool add
@mcp_param a number [required: true]
@mcp_param b number [required: true, default: 0]
";
        let meta = parse_doc_block(doc, "handlers::add");
        assert!(meta.is_tool());
        assert_eq!(meta.identifier.as_deref(), Some("add"));
        assert_eq!(meta.description, "Adds two numbers together.");
        assert_eq!(meta.parameters.len(), 2);
        assert_eq!(meta.parameters[0].param_type, ParamType::Number);
        assert_eq!(meta.parameters[1].default, Some(serde_json::json!(0)));
    }

    #[test]
    fn parses_resource_with_mime_type() {
        let doc = "\
The readme contents.

@mcp_resource docs://readme
@mcp_mime_type text/markdown
";
        let meta = parse_doc_block(doc, "handlers::readme");
        assert!(meta.is_resource());
        assert_eq!(meta.identifier.as_deref(), Some("docs://readme"));
        assert_eq!(meta.mime_type.as_deref(), Some("text/markdown"));
    }

    #[test]
    fn parses_prompt_with_args() {
        let doc = "\
Greets a user by name.

@mcp_prompt greeting
@mcp_arg name [required: true]
@mcp_arg formal [required: false]
";
        let meta = parse_doc_block(doc, "handlers::greeting");
        assert!(meta.is_prompt());
        assert_eq!(meta.arguments.len(), 2);
        assert!(meta.arguments[0].required);
        assert!(!meta.arguments[1].required);
    }

    #[test]
    fn malformed_param_line_is_skipped_not_fatal() {
        let doc = "\
A tool with a broken param line.

@mcp_tool broken
@mcp_param onlyname
@mcp_param b number [required: true]
";
        let meta = parse_doc_block(doc, "handlers::broken");
        assert!(meta.is_tool());
        assert_eq!(meta.parameters.len(), 1);
        assert_eq!(meta.parameters[0].name, "b");
    }
}
