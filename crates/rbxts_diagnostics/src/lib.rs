//! rbxts-lint diagnostics - Rule-independent diagnostic types
//!
//! This crate provides the core diagnostic infrastructure used by the
//! linter: locations, severities, fixes, suggestions and message
//! template rendering.

use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// Category of a lint rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Constructs the transpiler cannot emit at all
    Unsupported,
    /// Likely bugs under Luau runtime semantics
    Correctness,
    /// Style and API-preference issues
    Style,
    /// Performance improvements
    Performance,
}

/// A location in source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// File path
    pub file: String,
    /// 1-indexed line number
    pub line: u32,
    /// 1-indexed column number
    pub column: u32,
    /// Byte offset start
    pub start: u32,
    /// Byte offset end
    pub end: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32, start: u32, end: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            start,
            end,
        }
    }
}

/// A text edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// Byte offset start
    pub start: u32,
    /// Byte offset end
    pub end: u32,
    /// Replacement text
    pub replacement: String,
}

impl Edit {
    pub fn new(start: u32, end: u32, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }

    /// Create an insertion at a position
    pub fn insert(pos: u32, text: impl Into<String>) -> Self {
        Self::new(pos, pos, text)
    }

    /// Create a deletion of a range
    pub fn delete(start: u32, end: u32) -> Self {
        Self::new(start, end, "")
    }
}

/// An automatic fix for a diagnostic
///
/// Edits must be non-overlapping; applying them to the original source
/// must yield re-parseable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    /// Description of what this fix does
    pub message: String,
    /// Edits to apply
    pub edits: Vec<Edit>,
}

/// A non-automatic alternative rewrite, surfaced to the user by label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable label
    pub label: String,
    /// Edits to apply when accepted
    pub edits: Vec<Edit>,
}

/// A diagnostic message from the linter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule code (e.g. "RBX001")
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Category
    pub category: Category,
    /// Location in source
    pub location: Location,
    /// Optional fix
    pub fix: Option<Fix>,
    /// Optional suggestions
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        category: Category,
        location: Location,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
            category,
            location,
            fix: None,
            suggestions: Vec::new(),
        }
    }

    /// Add a fix to this diagnostic
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Add a suggestion to this diagnostic
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// Create an error diagnostic
    pub fn error(
        code: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(code, message, Severity::Error, Category::Unsupported, location)
    }

    /// Create a warning diagnostic
    pub fn warning(
        code: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(code, message, Severity::Warning, Category::Correctness, location)
    }

    /// Create a style diagnostic
    pub fn style(
        code: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(code, message, Severity::Info, Category::Style, location)
    }

    /// Create a hint diagnostic
    pub fn hint(
        code: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(code, message, Severity::Hint, Category::Style, location)
    }
}

/// Substitute `{{placeholder}}` keys in a message template.
///
/// Placeholder/template consistency is a property of each rule's constant
/// table and is pinned by that rule's tests; rendering itself never fails.
pub fn render_template(template: &str, data: &[(&str, &str)]) -> String {
    let mut message = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        message.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        if let Some(close) = after.find("}}") {
            let key = &after[..close];
            match data.iter().find(|(k, _)| *k == key) {
                Some((_, value)) => message.push_str(value),
                None => {
                    // Leave unresolved placeholders visible; tests catch them
                    message.push_str("{{");
                    message.push_str(key);
                    message.push_str("}}");
                }
            }
            rest = &after[close + 2..];
        } else {
            message.push_str("{{");
            rest = after;
        }
    }
    message.push_str(rest);
    message
}

/// Does the rendered template still contain an unresolved placeholder?
pub fn has_unresolved_placeholder(message: &str) -> bool {
    message.contains("{{")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_placeholders() {
        let message = render_template(
            "'{{operator}}' is not supported. Use .{{method}}() instead.",
            &[("operator", "+"), ("method", "add")],
        );
        assert_eq!(message, "'+' is not supported. Use .add() instead.");
        assert!(!has_unresolved_placeholder(&message));
    }

    #[test]
    fn missing_data_is_left_visible() {
        let message = render_template("use {{fn}}", &[]);
        assert_eq!(message, "use {{fn}}");
        assert!(has_unresolved_placeholder(&message));
    }

    #[test]
    fn edit_constructors() {
        assert_eq!(Edit::insert(4, "x"), Edit::new(4, 4, "x"));
        assert_eq!(Edit::delete(1, 3), Edit::new(1, 3, ""));
    }
}
