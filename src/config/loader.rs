//! Configuration loading and discovery for `tokensrc.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::TokensrcConfig;
use crate::color::ColorFormat;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file name searched for during discovery.
pub const CONFIG_FILE_NAME: &str = "tokensrc.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse tokensrc.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the alias heuristic
    pub alias_heuristic: Option<bool>,
    /// Override the deep-scan bound
    pub max_scan_depth: Option<usize>,
    /// Override the color notation
    pub color_format: Option<ColorFormat>,
    /// Override pretty printing
    pub pretty: Option<bool>,
    /// Enable strict leftover checking
    pub strict: Option<bool>,
}

/// Find tokensrc.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for tokensrc.toml
/// 2. Check XDG_CONFIG_HOME/tokensrc/tokensrc.toml (or ~/.config/tokensrc/tokensrc.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find tokensrc.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("tokensrc").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find tokensrc.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a tokensrc.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the
/// default configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("design/tokensrc.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<TokensrcConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(TokensrcConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<TokensrcConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: TokensrcConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut TokensrcConfig, overrides: &CliOverrides) {
    if let Some(alias_heuristic) = overrides.alias_heuristic {
        config.resolve.alias_heuristic = alias_heuristic;
    }
    if let Some(max_scan_depth) = overrides.max_scan_depth {
        config.resolve.max_scan_depth = max_scan_depth;
    }
    if let Some(color_format) = overrides.color_format {
        config.resolve.color_format = color_format;
    }
    if let Some(pretty) = overrides.pretty {
        config.output.pretty = pretty;
    }
    if let Some(strict) = overrides.strict {
        config.output.strict = strict;
    }
}
