// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, CtsConfig, CONFIG_FILE_NAME};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the CTS configuration file
///
/// Search order:
/// 1. `CTS_CONFIG_PATH` environment variable
/// 2. Current working directory: `./cts_configuration.toml`
/// 3. Parent directories (searches up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::ExplicitPathNotFound` if `CTS_CONFIG_PATH` names a missing file, and
/// `ConfigError::FileNotFound` if no config file is found in any searched location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    // 1. Check environment variable first
    if let Ok(env_path) = env::var("CTS_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::ExplicitPathNotFound(path));
    }

    // 2. Current directory, then up to 5 parents
    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(
            cwd.ancestors()
                .skip(1)
                .take(5)
                .map(|parent| parent.join(CONFIG_FILE_NAME)),
        );
    }

    if let Some(path) = search_paths.iter().find(|path| path.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "CTS configuration file '{}' not found in any of these locations:\n{}\n\nSet CTS_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<CtsConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: CtsConfig = toml::from_str(&content)?;

    apply_overrides(&mut config, cli_args);
    Ok(config)
}

/// Like [`load_config`] without an explicit path, but falls back to built-in defaults when no
/// file is found. Overrides still apply on top of the defaults. A `CTS_CONFIG_PATH` pointing at a
/// missing file is still an error.
pub fn load_config_or_default(cli_args: Option<&HashMap<String, String>>) -> ConfigResult<CtsConfig> {
    match load_config(None, cli_args) {
        Err(ConfigError::FileNotFound(_)) => {
            let mut config = CtsConfig::default();
            apply_overrides(&mut config, cli_args);
            Ok(config)
        }
        other => other,
    }
}

fn apply_overrides(config: &mut CtsConfig, cli_args: Option<&HashMap<String, String>>) {
    apply_environment_overrides(config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(config, cli);
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `CTS_TRANSPORT_KIND` -> `transport.kind`
/// - `CTS_CAPTURE_PATH` -> `transport.capture_path`
/// - `CTS_POLL_INTERVAL_MS` -> `player.poll_interval_ms`
/// - `CTS_MAX_FRAMES` -> `player.max_frames`
/// - `CTS_OUTPUT` -> `player.output`
/// - `CTS_LOG_LEVEL` -> `logging.level`
///
/// Values that do not parse are ignored.
pub fn apply_environment_overrides(config: &mut CtsConfig) {
    let lookup: HashMap<String, String> = [
        ("CTS_TRANSPORT_KIND", "transport_kind"),
        ("CTS_CAPTURE_PATH", "capture_path"),
        ("CTS_POLL_INTERVAL_MS", "poll_interval_ms"),
        ("CTS_MAX_FRAMES", "max_frames"),
        ("CTS_OUTPUT", "output"),
        ("CTS_LOG_LEVEL", "log_level"),
    ]
    .into_iter()
    .filter_map(|(variable, key)| env::var(variable).ok().map(|value| (key.to_string(), value)))
    .collect();
    apply_cli_overrides(config, &lookup);
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"transport_kind": "replay", "max_frames": "10"}`)
///
/// Values that do not parse are ignored.
pub fn apply_cli_overrides(config: &mut CtsConfig, cli_args: &HashMap<String, String>) {
    // Transport settings
    if let Some(value) = cli_args.get("transport_kind") {
        if let Ok(kind) = value.parse() {
            config.transport.kind = kind;
        }
    }
    if let Some(value) = cli_args.get("capture_path") {
        config.transport.capture_path = PathBuf::from(value);
    }

    // Player settings
    if let Some(value) = cli_args.get("poll_interval_ms") {
        if let Ok(interval) = value.parse::<u64>() {
            config.player.poll_interval_ms = interval;
        }
    }
    if let Some(value) = cli_args.get("max_frames") {
        if let Ok(frames) = value.parse::<u64>() {
            config.player.max_frames = frames;
        }
    }
    if let Some(value) = cli_args.get("output") {
        if let Ok(output) = value.parse() {
            config.player.output = output;
        }
    }
    if let Some(value) = cli_args.get("record_path") {
        config.player.record_path = PathBuf::from(value);
    }

    // Logging settings
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
}
