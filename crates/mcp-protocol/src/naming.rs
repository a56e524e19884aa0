//! Default identifier derivation shared by the capability traits.

/// Derive a kebab-case name from a type's short (unqualified) name.
///
/// `mcp_protocol::capability::AddTool` -> `"add-tool"`. Used as the default
/// `name()` for `Tool`/`Resource`/`Prompt` implementers that don't override
/// it explicitly.
pub fn kebab_case_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let short = full.rsplit("::").next().unwrap_or(full);
    let short = short.split('<').next().unwrap_or(short);

    let mut out = String::with_capacity(short.len() + 4);
    for (i, ch) in short.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AddTool;
    struct Echo;

    #[test]
    fn splits_camel_case_words() {
        assert_eq!(kebab_case_type_name::<AddTool>(), "add-tool");
    }

    #[test]
    fn single_word_is_lowercased() {
        assert_eq!(kebab_case_type_name::<Echo>(), "echo");
    }
}
