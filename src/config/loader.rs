//! Configuration file loading with precedence handling.

use crate::query::{SortDirection, DEFAULT_PAGE_SIZE};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Responses slower than this are flagged in the table.
pub const DEFAULT_SLOW_RESPONSE_MS: u64 = 2000;

/// Characters of question/answer text shown before truncation.
pub const DEFAULT_PREVIEW_LENGTH: usize = 60;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/qlog/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Entries per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Initial timestamp sort ("asc" or "desc").
    #[serde(default)]
    pub sort_direction: Option<SortDirection>,

    /// Slow-response threshold in milliseconds.
    #[serde(default)]
    pub slow_response_ms: Option<u64>,

    /// Preview length for question and answer columns.
    #[serde(default)]
    pub preview_length: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Entries per page.
    pub page_size: usize,
    /// Initial timestamp sort direction.
    pub sort_direction: SortDirection,
    /// Responses slower than this are marked in the table.
    pub slow_response_ms: u64,
    /// Characters of question and answer text shown per row.
    pub preview_length: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort_direction: SortDirection::Desc,
            slow_response_ms: DEFAULT_SLOW_RESPONSE_MS,
            preview_length: DEFAULT_PREVIEW_LENGTH,
            log_file_path: default_log_path(),
        }
    }
}

/// Flags from the command line that override configuration.
///
/// `None` means the flag was not given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--page-size`
    pub page_size: Option<usize>,
    /// `--sort`
    pub sort_direction: Option<SortDirection>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/qlog/qlog.log` on Unix-like systems, falling back
/// to the current directory when no state directory is known.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("qlog").join("qlog.log"),
        None => PathBuf::from("qlog.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

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

    Ok(Some(config))
}

/// Resolve default config file path: `~/.config/qlog/config.toml` on Unix.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("qlog").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `QLOG_CONFIG` environment variable
/// 3. Default path `~/.config/qlog/config.toml`
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

    if let Ok(env_path) = std::env::var("QLOG_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        page_size: config.page_size.unwrap_or(defaults.page_size),
        sort_direction: config.sort_direction.unwrap_or(defaults.sort_direction),
        slow_response_ms: config.slow_response_ms.unwrap_or(defaults.slow_response_ms),
        preview_length: config.preview_length.unwrap_or(defaults.preview_length),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `QLOG_PAGE_SIZE` and `QLOG_SORT`. Values that do not parse are
/// ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("QLOG_PAGE_SIZE") {
        match raw.trim().parse::<usize>() {
            Ok(page_size) => config.page_size = page_size,
            Err(e) => warn!(value = %raw, error = %e, "ignoring QLOG_PAGE_SIZE"),
        }
    }

    if let Ok(raw) = std::env::var("QLOG_SORT") {
        match raw.trim().parse::<SortDirection>() {
            Ok(direction) => config.sort_direction = direction,
            Err(e) => warn!(value = %raw, error = %e, "ignoring QLOG_SORT"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(page_size) = overrides.page_size {
        config.page_size = page_size;
    }

    if let Some(direction) = overrides.sort_direction {
        config.sort_direction = direction;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
