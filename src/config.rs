//! Configuration management for autoargs.
//!
//! Settings are loaded from a TOML file; every field has a default so a
//! missing file or a partial file is fine.

use crate::error::{AutoargsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Pass positional-or-keyword parameters positionally when possible.
    #[serde(default = "default_to_arg")]
    pub default_to_arg: bool,

    /// Color for parser diagnostics and help.
    #[serde(default)]
    pub color: ColorMode,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_to_arg() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_to_arg: default_to_arg(),
            color: ColorMode::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// When to color parser output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for clap::ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => Self::Auto,
            ColorMode::Always => Self::Always,
            ColorMode::Never => Self::Never,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Settings {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("autoargs")
            .join("config.toml")
    }

    /// Loads settings from a TOML file, falling back to defaults if it does not exist.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AutoargsError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses settings from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            AutoargsError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
