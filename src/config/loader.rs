//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use super::{DEFAULT_OVERSCAN, DEFAULT_SETTLE_DELAY};

/// Default frame interval for the terminal demo (~60 Hz).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Config file parses but a value is out of range.
    #[error("Invalid value for '{field}' in {path}: {reason}")]
    InvalidValue {
        /// Path of the offending file.
        path: PathBuf,
        /// Key name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/vlist/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Items rendered beyond each viewport edge.
    #[serde(default)]
    pub overscan_count: Option<usize>,

    /// Quiet period in milliseconds before scrolling counts as settled. Must be > 0.
    #[serde(default)]
    pub settle_delay_ms: Option<u64>,

    /// Frame interval for the terminal demo in milliseconds. Must be > 0.
    #[serde(default)]
    pub frame_interval_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Overscan count.
    pub overscan_count: usize,
    /// Settle delay in milliseconds.
    pub settle_delay_ms: u64,
    /// Demo frame interval in milliseconds.
    pub frame_interval_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            overscan_count: DEFAULT_OVERSCAN,
            settle_delay_ms: DEFAULT_SETTLE_DELAY.as_millis() as u64,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/vlist/vlist.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("vlist").join("vlist.log")
    } else {
        PathBuf::from("vlist.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read, parsed, or holds an
/// out-of-range value.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    validate(&config, &path)?;

    Ok(Some(config))
}

fn validate(config: &ConfigFile, path: &std::path::Path) -> Result<(), ConfigError> {
    let positive = [
        ("settle_delay_ms", config.settle_delay_ms),
        ("frame_interval_ms", config.frame_interval_ms),
    ];
    for (field, value) in positive {
        if value == Some(0) {
            return Err(ConfigError::InvalidValue {
                path: path.to_path_buf(),
                field,
                reason: "must be greater than 0".to_string(),
            });
        }
    }
    Ok(())
}

/// Resolve default config file path.
///
/// Returns `~/.config/vlist/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vlist").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `VLIST_CONFIG` environment variable
/// 3. Default path `~/.config/vlist/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("VLIST_CONFIG") {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(
                "VLIST_CONFIG is set but empty".to_string(),
            ));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        overscan_count: config.overscan_count.unwrap_or(defaults.overscan_count),
        settle_delay_ms: config.settle_delay_ms.unwrap_or(defaults.settle_delay_ms),
        frame_interval_ms: config
            .frame_interval_ms
            .unwrap_or(defaults.frame_interval_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `VLIST_OVERSCAN`: Override overscan count
/// - `VLIST_SETTLE_DELAY_MS`: Override settle delay (ignored unless > 0)
///
/// Unparsable values are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("VLIST_OVERSCAN") {
        match raw.parse::<usize>() {
            Ok(overscan) => config.overscan_count = overscan,
            Err(_) => tracing::warn!(value = %raw, "Ignoring invalid VLIST_OVERSCAN"),
        }
    }

    if let Ok(raw) = std::env::var("VLIST_SETTLE_DELAY_MS") {
        match raw.parse::<u64>() {
            Ok(delay) if delay > 0 => config.settle_delay_ms = delay,
            _ => tracing::warn!(value = %raw, "Ignoring invalid VLIST_SETTLE_DELAY_MS"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    overscan_override: Option<usize>,
    settle_delay_override: Option<u64>,
) -> ResolvedConfig {
    if let Some(overscan) = overscan_override {
        config.overscan_count = overscan;
    }

    if let Some(delay) = settle_delay_override {
        config.settle_delay_ms = delay;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
