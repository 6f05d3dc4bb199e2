//! CLI configuration file support.
//!
//! This module provides support for loading configuration from TOML files.
//! Configuration can be loaded from:
//! 1. An explicit path specified via --config flag
//! 2. The XDG config directory (~/.config/cmdr/config.toml)
//! 3. Fall back to defaults

use cmdr::delay;
use cmdr::term::ColorMode;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Status output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// When to colorize status lines (default: auto).
    #[serde(default)]
    pub color: ColorMode,
}

/// Runner configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Default working directory for executed commands.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Pacing pause imposed after every execution attempt (default: 1s).
    /// Accepts "500ms"-style strings or a bare number of seconds.
    #[serde(default = "default_settle", deserialize_with = "delay::deserialize")]
    pub settle: Duration,
}

fn default_settle() -> Duration {
    cmdr::DEFAULT_SETTLE
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            working_dir: None,
            settle: default_settle(),
        }
    }
}

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Status output configuration.
    #[serde(default)]
    pub output: OutputConfig,

    /// Runner configuration.
    #[serde(default)]
    pub runner: RunnerConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/cmdr/config.toml).
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("cmdr");
            path.push("config.toml");
            path
        })
    }

    /// Load configuration with priority:
    /// 1. Explicit config path if provided
    /// 2. XDG config path if it exists
    /// 3. Default configuration
    pub fn load(explicit_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Try explicit path first
        if let Some(path) = explicit_path {
            return Self::from_file(&path);
        }

        // Try XDG default path
        if let Some(path) = Self::default_config_path()
            && path.exists()
        {
            return Self::from_file(&path);
        }

        // Fall back to defaults
        Ok(Self::default())
    }
}
