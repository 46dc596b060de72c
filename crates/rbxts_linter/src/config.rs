//! Per-rule option validation
//!
//! Options arrive as a JSON document keyed by rule name. Unknown rules,
//! unknown fields and wrong types are configuration errors, fatal at
//! registration time - before any file is linted.

use serde::Deserialize;

/// Validated settings for the configurable rules. Every field has the
/// rule's documented default.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct RuleSettings {
    #[serde(default)]
    pub no_any: NoAnyOptions,
    #[serde(default)]
    pub prefer_get_players: PreferGetPlayersOptions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct NoAnyOptions {
    /// Whether `any` is auto-fixed to `unknown` (otherwise only a
    /// suggestion is offered)
    #[serde(default = "default_true")]
    pub fix_to_unknown: bool,
}

impl Default for NoAnyOptions {
    fn default() -> Self {
        Self {
            fix_to_unknown: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PreferGetPlayersOptions {
    /// Resolve the receiver's type instead of matching the `Players`
    /// identifier. Useful when the service is stored under an alias.
    #[serde(default)]
    pub validate_type: bool,
}

fn default_true() -> bool {
    true
}

/// Configuration error, surfaced before any file is processed
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid rule configuration: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl RuleSettings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = RuleSettings::default();
        assert!(settings.no_any.fix_to_unknown);
        assert!(!settings.prefer_get_players.validate_type);
    }

    #[test]
    fn parses_overrides() {
        let settings = RuleSettings::from_json(
            r#"{ "no-any": { "fixToUnknown": false }, "prefer-get-players": { "validateType": true } }"#,
        )
        .expect("valid settings");
        assert!(!settings.no_any.fix_to_unknown);
        assert!(settings.prefer_get_players.validate_type);
    }

    #[test]
    fn unknown_fields_are_fatal() {
        assert!(RuleSettings::from_json(r#"{ "no-any": { "fixAnything": true } }"#).is_err());
        assert!(RuleSettings::from_json(r#"{ "mystery-rule": {} }"#).is_err());
    }

    #[test]
    fn wrong_types_are_fatal() {
        assert!(RuleSettings::from_json(r#"{ "no-any": { "fixToUnknown": "yes" } }"#).is_err());
    }
}
