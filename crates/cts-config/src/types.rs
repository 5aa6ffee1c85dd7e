// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `cts_configuration.toml`.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CtsConfig {
    pub transport: TransportConfig,
    pub player: PlayerConfig,
    pub logging: LoggingConfig,
}

/// Where raw frames come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Frames recorded to a capture file
    Replay,
    /// Generated frames, no sensor needed
    #[default]
    Synthetic,
}

impl FromStr for TransportKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "replay" => Ok(TransportKind::Replay),
            "synthetic" => Ok(TransportKind::Synthetic),
            other => Err(ConfigError::InvalidValue(format!(
                "transport.kind must be 'replay' or 'synthetic', got '{}'",
                other
            ))),
        }
    }
}

impl Display for TransportKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Replay => write!(f, "replay"),
            TransportKind::Synthetic => write!(f, "synthetic"),
        }
    }
}

/// Text for humans or one JSON object per line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidValue(format!(
                "output format must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }
}

/// Frame source configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    pub kind: TransportKind,
    pub capture_path: PathBuf,
    pub loop_capture: bool,
    /// Synthetic only: damage one section checksum every N frames (0 = never)
    pub synthetic_corrupt_every: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            kind: TransportKind::default(),
            capture_path: PathBuf::new(),
            loop_capture: false,
            synthetic_corrupt_every: 0,
        }
    }
}

/// Poll loop configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub poll_interval_ms: u64,
    /// 0 = unbounded
    pub max_frames: u64,
    pub print_detections: bool,
    pub output: OutputFormat,
    /// When set, every raw frame read is appended here
    pub record_path: PathBuf,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 250,
            max_frames: 0,
            print_detections: true,
            output: OutputFormat::Text,
            record_path: PathBuf::new(),
        }
    }
}

impl PlayerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn frame_limit(&self) -> Option<u64> {
        (self.max_frames > 0).then_some(self.max_frames)
    }

    pub fn record_path(&self) -> Option<&PathBuf> {
        (!self.record_path.as_os_str().is_empty()).then_some(&self.record_path)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: OutputFormat,
    /// Directory for rolling log files; empty disables file logging
    pub log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: OutputFormat::Text,
            log_dir: PathBuf::new(),
        }
    }
}

impl LoggingConfig {
    pub fn log_dir(&self) -> Option<&PathBuf> {
        (!self.log_dir.as_os_str().is_empty()).then_some(&self.log_dir)
    }
}
