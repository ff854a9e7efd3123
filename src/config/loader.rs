//! Configuration file loading with precedence handling.

use crate::geometry::{ResizeFrame, ResizeSettings};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SIGNAGE_LAYOUT_CONFIG";

/// Environment variable overriding `snap_threshold`.
pub const SNAP_THRESHOLD_ENV_VAR: &str = "SIGNAGE_LAYOUT_SNAP_THRESHOLD";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
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

    /// A setting parsed but is out of range.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Setting name.
        key: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/signage-layout/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Ratios this close to 50 snap to 50 while resizing.
    #[serde(default)]
    pub snap_threshold: Option<f64>,

    /// Ratios this close to 0 or 100 collapse the split on release.
    #[serde(default)]
    pub collapse_epsilon: Option<f64>,

    /// Region resize percentages are measured against.
    #[serde(default)]
    pub resize_frame: Option<ResizeFrame>,

    /// Show node ids in pane titles on startup.
    #[serde(default)]
    pub show_ids: Option<bool>,

    /// Open layouts read-only.
    #[serde(default)]
    pub read_only: Option<bool>,

    /// Content references offered by the palette.
    #[serde(default)]
    pub content: Option<Vec<String>>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Snap threshold in percent.
    pub snap_threshold: f64,
    /// Collapse epsilon in percent.
    pub collapse_epsilon: f64,
    /// Resize reference region.
    pub resize_frame: ResizeFrame,
    /// Show node ids.
    pub show_ids: bool,
    /// Read-only mode.
    pub read_only: bool,
    /// Palette entries.
    pub content: Vec<String>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            snap_threshold: ResizeSettings::DEFAULT_SNAP_THRESHOLD,
            collapse_epsilon: ResizeSettings::DEFAULT_COLLAPSE_EPSILON,
            resize_frame: ResizeFrame::Editor,
            show_ids: false,
            read_only: false,
            content: Vec::new(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Settings for the resize engine.
    pub fn resize_settings(&self) -> ResizeSettings {
        ResizeSettings {
            snap_threshold: self.snap_threshold,
            collapse_epsilon: self.collapse_epsilon,
            frame: self.resize_frame,
        }
    }

    /// Reject settings the resize engine cannot work with.
    ///
    /// # Errors
    ///
    /// `collapse_epsilon` must be finite and within `[0, 50)`;
    /// `snap_threshold` must be finite and within `[0, 50 - collapse_epsilon)`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.collapse_epsilon.is_finite() || !(0.0..50.0).contains(&self.collapse_epsilon) {
            return Err(ConfigError::InvalidValue {
                key: "collapse_epsilon",
                reason: format!("{} is not within 0..50", self.collapse_epsilon),
            });
        }
        let limit = ResizeSettings::snap_threshold_limit(self.collapse_epsilon);
        if !self.snap_threshold.is_finite() || !(0.0..limit).contains(&self.snap_threshold) {
            return Err(ConfigError::InvalidValue {
                key: "snap_threshold",
                reason: format!("{} is not within 0..{limit}", self.snap_threshold),
            });
        }
        Ok(())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/signage-layout/signage-layout.log` on Unix-like
/// systems, or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("signage-layout").join("signage-layout.log")
    } else {
        PathBuf::from("signage-layout.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
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

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/signage-layout/config.toml` on Unix, appropriate path
/// on other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("signage-layout").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SIGNAGE_LAYOUT_CONFIG` environment variable
/// 3. Default path `~/.config/signage-layout/config.toml`
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

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SIGNAGE_LAYOUT_SNAP_THRESHOLD`: override `snap_threshold` when it
///   parses as a finite non-negative number; anything else is ignored
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(SNAP_THRESHOLD_ENV_VAR) {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => config.snap_threshold = value,
            _ => tracing::warn!(value = %raw, "Ignoring invalid {}", SNAP_THRESHOLD_ENV_VAR),
        }
    }

    config
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
        snap_threshold: config.snap_threshold.unwrap_or(defaults.snap_threshold),
        collapse_epsilon: config.collapse_epsilon.unwrap_or(defaults.collapse_epsilon),
        resize_frame: config.resize_frame.unwrap_or(defaults.resize_frame),
        show_ids: config.show_ids.unwrap_or(defaults.show_ids),
        read_only: config.read_only.unwrap_or(defaults.read_only),
        content: config.content.unwrap_or(defaults.content),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Overrides taken from the command line.
///
/// Flags only ever switch a setting on; absent values leave it alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--read-only`
    pub read_only: bool,
    /// `--show-ids`
    pub show_ids: bool,
    /// `--snap-threshold`
    pub snap_threshold: Option<f64>,
    /// `--content`, repeatable; replaces the configured palette when given.
    pub content: Vec<String>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if cli.read_only {
        config.read_only = true;
    }

    if cli.show_ids {
        config.show_ids = true;
    }

    if let Some(threshold) = cli.snap_threshold {
        config.snap_threshold = threshold;
    }

    if !cli.content.is_empty() {
        config.content = cli.content;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
