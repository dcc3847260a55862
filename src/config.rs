//! Configuration management with TOML file support.
//!
//! Merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`~/.config/logsum/config.toml` or `$XDG_CONFIG_HOME/logsum/config.toml`)
//! 3. Built-in defaults

use std::path::PathBuf;

use serde::Deserialize;

use crate::cli::{Cli, ColorMode};
use crate::error::AnalyzerError;

/// Runtime configuration merged from defaults, config file, and CLI arguments.
///
/// Use [`Config::from_cli`] to build from parsed CLI arguments, or
/// [`Config::default`] for built-in defaults (useful in tests and benchmarks).
#[derive(Debug, Clone)]
pub struct Config {
    /// Color output mode (auto/always/never).
    pub color_mode: ColorMode,
    /// Output the summary as JSON instead of the text report.
    pub json_output: bool,
    /// Timestamp display format for the time range (strftime-compatible).
    pub timestamp_format: String,
    /// Maximum character length for displayed error messages before
    /// truncation. 0 = no limit.
    pub max_message_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            json_output: false,
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            max_message_length: 60,
        }
    }
}

impl Config {
    /// Build a [`Config`] from CLI arguments, loading the config file if present.
    ///
    /// Merge precedence: CLI flags > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, AnalyzerError> {
        let mut config = Self::default();

        let config_path = cli.config.clone().unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            let file_config = FileConfig::load(&config_path)?;
            config.apply_file_config(file_config);
        }

        config.color_mode = cli.color;
        config.json_output = cli.json;

        if let Some(ref format) = cli.timestamp_format {
            config.timestamp_format.clone_from(format);
        }
        if let Some(max_len) = cli.max_message_length {
            config.max_message_length = max_len;
        }

        Ok(config)
    }

    /// Default config file path: `$XDG_CONFIG_HOME/logsum/config.toml` or
    /// `~/.config/logsum/config.toml`.
    fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("logsum").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("logsum")
                .join("config.toml")
        } else {
            PathBuf::from(".config/logsum/config.toml")
        }
    }

    /// Apply settings from a parsed config file.
    fn apply_file_config(&mut self, file: FileConfig) {
        if let Some(color) = file.color {
            self.color_mode = match color.as_str() {
                "always" => ColorMode::Always,
                "never" => ColorMode::Never,
                _ => ColorMode::Auto,
            };
        }

        if let Some(format) = file.timestamp_format {
            self.timestamp_format = format;
        }

        if let Some(max_len) = file.max_message_length {
            self.max_message_length = max_len;
        }
    }
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Deserialize)]
struct FileConfig {
    color: Option<String>,
    timestamp_format: Option<String>,
    max_message_length: Option<usize>,
}

impl FileConfig {
    fn load(path: &PathBuf) -> Result<Self, AnalyzerError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalyzerError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
