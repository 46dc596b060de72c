//! Luau identifier restrictions
//!
//! Names that must not be used as identifiers in code that compiles to
//! Luau: Luau's own keywords, and globals the compiler's runtime emits
//! references to.

/// Luau keywords with no TypeScript counterpart. Using one as an
/// identifier produces unloadable Luau output.
pub const LUAU_KEYWORDS: &[&str] = &[
    "and", "elseif", "end", "error", "local", "nil", "not", "or", "repeat", "then", "until",
];

/// Globals reserved for the compiler's emitted runtime and the Luau
/// standard library environment.
pub const RESERVED_IDENTIFIERS: &[&str] = &[
    "TS",
    "exports",
    "assert",
    "bit32",
    "collectgarbage",
    "coroutine",
    "getmetatable",
    "ipairs",
    "math",
    "next",
    "os",
    "pairs",
    "pcall",
    "print",
    "rawequal",
    "rawget",
    "rawlen",
    "rawset",
    "select",
    "setmetatable",
    "shared",
    "string",
    "table",
    "tick",
    "time",
    "tonumber",
    "tostring",
    "type",
    "typeof",
    "unpack",
    "utf8",
    "warn",
    "xpcall",
];

pub fn is_luau_keyword(name: &str) -> bool {
    LUAU_KEYWORDS.contains(&name)
}

pub fn is_reserved_identifier(name: &str) -> bool {
    RESERVED_IDENTIFIERS.contains(&name)
}

/// `^[A-Za-z_][A-Za-z0-9_]*$` — the Luau identifier charset. TypeScript
/// allows `$` and unicode; Luau does not.
pub fn is_valid_luau_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Any reason this name cannot survive transpilation as-is
pub fn is_restricted(name: &str) -> bool {
    is_luau_keyword(name) || is_reserved_identifier(name) || !is_valid_luau_identifier(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_and_reserved() {
        assert!(is_luau_keyword("nil"));
        assert!(is_reserved_identifier("TS"));
        assert!(!is_luau_keyword("vector"));
    }

    #[test]
    fn identifier_charset() {
        assert!(is_valid_luau_identifier("foo_bar2"));
        assert!(!is_valid_luau_identifier("$dollar"));
        assert!(!is_valid_luau_identifier("1abc"));
        assert!(!is_valid_luau_identifier(""));
    }
}
