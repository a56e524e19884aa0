//! Option-value literal parsing for `@mcp_param`/`@mcp_arg` option lists.

use serde_json::Value;

/// Parse one option value: boolean, null, integer, float, double-quoted
/// string, bracketed comma-list, or (fallback) the bare token as a string.
pub fn parse_value(raw: &str) -> Value {
    let raw = raw.trim();
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    if let Some(inner) = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        return Value::String(inner.to_string());
    }

    if let Some(inner) = raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        let items = split_top_level(inner, ',')
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .map(parse_value)
            .collect();
        return Value::Array(items);
    }

    if let Ok(i) = raw.parse::<i64>() {
        return Value::Number(i.into());
    }

    if let Ok(f) = raw.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }

    Value::String(raw.to_string())
}

/// Split `s` on `sep` at bracket/quote depth zero, so `[1, 2]` inside a
/// list value doesn't get split on its own inner comma.
pub fn split_top_level(s: &str, sep: char) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut current = String::new();

    for ch in s.chars() {
        match ch {
            '"' => {
                in_string = !in_string;
                current.push(ch);
            }
            '[' if !in_string => {
                depth += 1;
                current.push(ch);
            }
            ']' if !in_string => {
                depth -= 1;
                current.push(ch);
            }
            c if c == sep && depth == 0 && !in_string => {
                out.push(current.trim().to_string());
                current = String::new();
            }
            c => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        out.push(current.trim().to_string());
    }
    out
}

/// Parse a bracketed `key: value, key: value` option list. `raw` is the
/// text between (and not including) the brackets.
pub fn parse_options(raw: &str) -> Vec<(String, Value)> {
    split_top_level(raw, ',')
        .into_iter()
        .filter_map(|pair| {
            let (key, value) = pair.split_once(':')?;
            Some((key.trim().to_string(), parse_value(value.trim())))
        })
        .collect()
}
