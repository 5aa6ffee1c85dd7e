// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Every problem is collected before failing, so one run reports them all.

use crate::{ConfigError, ConfigResult, CtsConfig, TransportKind};

/// Longest poll interval accepted
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;

/// Log levels accepted by `logging.level`
pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - A capture path when replaying
/// - A known log level
/// - A poll interval no longer than a minute
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &CtsConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn collect_errors(config: &CtsConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    if config.transport.kind == TransportKind::Replay
        && config.transport.capture_path.as_os_str().is_empty()
    {
        errors.push(ConfigValidationError::MissingRequired {
            field: "transport.capture_path".to_string(),
        });
    }

    if !VALID_LOG_LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.player.poll_interval_ms > MAX_POLL_INTERVAL_MS {
        errors.push(ConfigValidationError::InvalidValue {
            field: "player.poll_interval_ms".to_string(),
            reason: format!(
                "{} ms exceeds the {} ms maximum",
                config.player.poll_interval_ms, MAX_POLL_INTERVAL_MS
            ),
        });
    }

    errors
}
