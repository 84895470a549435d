//! Configuration schema types for `tokensrc.toml`
//!
//! Defines the structure and validation rules for resolver configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::color::ColorFormat;
use crate::index::DEFAULT_MAX_SCAN_DEPTH;
use crate::modes::ModeNames;
use crate::resolve::{ResolveOptions, Resolver};

/// Largest accepted deep-scan bound.
pub const MAX_SCAN_DEPTH_LIMIT: usize = 64;

/// Alias resolution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Treat untagged `{id}` objects as aliases
    #[serde(default = "default_true")]
    pub alias_heuristic: bool,
    /// Deep-scan nesting bound
    #[serde(default = "default_max_scan_depth")]
    pub max_scan_depth: usize,
    /// Notation for extracted colors
    #[serde(default)]
    pub color_format: ColorFormat,
}

fn default_true() -> bool {
    true
}

fn default_max_scan_depth() -> usize {
    DEFAULT_MAX_SCAN_DEPTH
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            alias_heuristic: true,
            max_scan_depth: DEFAULT_MAX_SCAN_DEPTH,
            color_format: ColorFormat::default(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print resolved JSON
    #[serde(default = "default_true")]
    pub pretty: bool,
    /// Treat leftover aliases as an error
    #[serde(default)]
    pub strict: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true, strict: false }
    }
}

/// Complete tokensrc.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokensrcConfig {
    #[serde(default)]
    pub resolve: ResolveConfig,
    /// Mode identifier -> name entries, applied before any other naming
    #[serde(default)]
    pub modes: HashMap<String, String>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "resolve.max_scan_depth")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tokensrc.toml: '{}' {}", self.field, self.message)
    }
}

impl TokensrcConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if !(1..=MAX_SCAN_DEPTH_LIMIT).contains(&self.resolve.max_scan_depth) {
            errors.push(ConfigValidationError {
                field: "resolve.max_scan_depth".to_string(),
                message: format!("must be between 1 and {}", MAX_SCAN_DEPTH_LIMIT),
            });
        }

        let mut mode_ids: Vec<_> = self.modes.keys().collect();
        mode_ids.sort();
        for id in mode_ids {
            if id.trim().is_empty() {
                errors.push(ConfigValidationError {
                    field: "modes".to_string(),
                    message: "mode identifiers must be non-empty".to_string(),
                });
            } else if self.modes[id].trim().is_empty() {
                errors.push(ConfigValidationError {
                    field: format!("modes.\"{}\"", id),
                    message: "must be a non-empty name".to_string(),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            alias_heuristic: self.resolve.alias_heuristic,
            max_scan_depth: self.resolve.max_scan_depth,
            color_format: self.resolve.color_format,
        }
    }

    /// Mode name table with this config's entries as overrides.
    pub fn mode_names(&self) -> ModeNames {
        ModeNames::with_overrides(self.modes.iter().map(|(id, name)| (id.as_str(), name.as_str())))
    }

    /// A resolver carrying every setting from this config.
    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.resolve_options()).with_mode_names(self.mode_names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: TokensrcConfig = toml::from_str("").unwrap();
        assert_eq!(config, TokensrcConfig::default());
        assert!(config.resolve.alias_heuristic);
        assert_eq!(config.resolve.max_scan_depth, 10);
        assert!(config.output.pretty);
        assert!(!config.output.strict);
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[resolve]
alias_heuristic = false
max_scan_depth = 20
color_format = "hsl"

[modes]
"1:0" = "day"
"1:1" = "night"

[output]
pretty = false
strict = true
"#;
        let config: TokensrcConfig = toml::from_str(toml).unwrap();
        assert!(!config.resolve.alias_heuristic);
        assert_eq!(config.resolve.max_scan_depth, 20);
        assert_eq!(config.resolve.color_format, ColorFormat::Hsl);
        assert_eq!(config.modes.get("1:0").map(String::as_str), Some("day"));
        assert!(!config.output.pretty);
        assert!(config.output.strict);
    }

    #[test]
    fn test_unknown_color_format_rejected() {
        let toml = "[resolve]\ncolor_format = \"cmyk\"\n";
        assert!(toml::from_str::<TokensrcConfig>(toml).is_err());
    }

    #[test]
    fn test_validation_scan_depth_range() {
        for depth in [0, 65] {
            let config = TokensrcConfig {
                resolve: ResolveConfig { max_scan_depth: depth, ..Default::default() },
                ..Default::default()
            };
            let errors = config.validate();
            assert!(errors.iter().any(|e| e.field == "resolve.max_scan_depth"));
        }
    }

    #[test]
    fn test_validation_empty_mode_name() {
        let toml = "[modes]\n\"1:0\" = \"\"\n";
        let config: TokensrcConfig = toml::from_str(toml).unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "tokensrc.toml: 'modes.\"1:0\"' must be a non-empty name");
    }

    #[test]
    fn test_resolve_options_and_modes() {
        let toml = "[resolve]\ncolor_format = \"rgb\"\n[modes]\n\"1:0\" = \"day\"\n";
        let config: TokensrcConfig = toml::from_str(toml).unwrap();
        let options = config.resolve_options();
        assert_eq!(options.color_format, ColorFormat::Rgb);
        assert_eq!(config.mode_names().normalize("1:0"), "day");
        assert_eq!(config.mode_names().normalize("1:1"), "dark");
    }
}
