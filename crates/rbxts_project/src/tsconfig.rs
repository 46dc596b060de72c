//! Minimal tsconfig.json model
//!
//! Only the fields the linter consumes are modeled; everything else is
//! ignored. tsconfig allows trailing commas and comments in the wild, so
//! the input is lightly stripped before parsing.

use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Tsconfig {
    pub compiler_options: Option<CompilerOptions>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub type_roots: Option<Vec<String>>,
    pub strict: Option<bool>,
    pub jsx: Option<String>,
}

impl Tsconfig {
    pub fn parse(content: &str) -> Result<Self> {
        let cleaned = strip_jsonc(content);
        Ok(serde_json::from_str(&cleaned)?)
    }
}

/// Remove // and /* */ comments plus trailing commas so serde_json can
/// handle the JSONC dialect tsconfig files actually use.
fn strip_jsonc(content: &str) -> String {
    let bytes = content.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut in_string = false;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            out.push(b);
            if b == b'\\' && i + 1 < bytes.len() {
                out.push(bytes[i + 1]);
                i += 2;
                continue;
            }
            if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' => {
                in_string = true;
                out.push(b'"');
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 2;
            }
            b',' => {
                // Drop the comma if the next significant byte closes a scope
                let mut j = i + 1;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if matches!(bytes.get(j), Some(b'}') | Some(b']')) {
                    i += 1;
                } else {
                    out.push(b',');
                    i += 1;
                }
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).unwrap_or_else(|_| content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_roots() {
        let config = Tsconfig::parse(
            r#"{ "compilerOptions": { "typeRoots": ["node_modules/@rbxts"], "strict": true } }"#,
        )
        .expect("valid tsconfig");
        assert_eq!(
            config.compiler_options.unwrap().type_roots.unwrap(),
            vec!["node_modules/@rbxts".to_string()]
        );
    }

    #[test]
    fn tolerates_comments_and_trailing_commas() {
        let config = Tsconfig::parse(
            "{\n  // roblox-ts defaults\n  \"compilerOptions\": {\n    \"typeRoots\": [\"node_modules/@rbxts\",],\n  },\n}",
        )
        .expect("jsonc tsconfig");
        assert!(config.compiler_options.is_some());
    }

    #[test]
    fn missing_options_default_to_none() {
        let config = Tsconfig::parse("{}").expect("empty tsconfig");
        assert!(config.compiler_options.is_none());
    }
}
