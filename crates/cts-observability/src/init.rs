// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization for CTS tools
//!
//! Console output always goes to stderr, so stdout stays free for frame output. With the
//! `file-logging` feature and a log directory, a JSON log file is written as well:
//! ```text
//! <log_dir>/
//!   └── run_20250101_120000/
//!       └── cts.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging settings independent of where they were configured
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Level for everything not named by a debug flag
    pub level: String,
    /// JSON lines instead of human-readable console output
    pub json: bool,
    /// Base directory for log files; `None` disables file logging
    pub log_dir: Option<PathBuf>,
    /// Keep N most recent run folders
    pub retention_runs: usize,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            log_dir: None,
            retention_runs: 10,
        }
    }
}

/// Logging initialization result
///
/// Holds the non-blocking writer guards; logs are flushed when it is dropped.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving log files, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

fn build_filter(debug_flags: &CrateDebugFlags, level: &str) -> Result<EnvFilter> {
    let filter = debug_flags.to_filter_string(level);
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter: {}", filter))
}

fn console_layer(debug_flags: &CrateDebugFlags, options: &LoggingOptions) -> Result<BoxedLayer> {
    let filter = build_filter(debug_flags, &options.level)?;
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(false)
        .with_line_number(false);
    Ok(if options.json {
        layer.json().with_filter(filter).boxed()
    } else {
        layer.with_target(false).with_filter(filter).boxed()
    })
}

/// Initialize logging with console output and, when configured, file output
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags for filtering
/// * `options` - Level, format and log directory
///
/// # Example
/// ```rust,no_run
/// use cts_observability::{init_logging, CrateDebugFlags, LoggingOptions};
///
/// let _guard = init_logging(&CrateDebugFlags::default(), &LoggingOptions::default()).unwrap();
/// tracing::info!("logging ready");
/// ```
pub fn init_logging(
    debug_flags: &CrateDebugFlags,
    options: &LoggingOptions,
) -> Result<LoggingGuard> {
    #[cfg_attr(not(feature = "file-logging"), allow(unused_mut))]
    let mut layers: Vec<BoxedLayer> = vec![console_layer(debug_flags, options)?];

    #[cfg(feature = "file-logging")]
    let (file_guards, log_dir) = match &options.log_dir {
        Some(base_log_dir) => {
            let (layer, guard, run_folder) = file_layer(debug_flags, options, base_log_dir)?;
            layers.push(layer);
            (vec![guard], Some(run_folder))
        }
        None => (Vec::new(), None),
    };
    #[cfg(not(feature = "file-logging"))]
    let log_dir: Option<PathBuf> = None;

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    #[cfg(not(feature = "file-logging"))]
    if let Some(requested) = &options.log_dir {
        tracing::warn!(
            log_dir = %requested.display(),
            "File logging requested but cts-observability was built without the file-logging feature"
        );
    }

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
    })
}

#[cfg(feature = "file-logging")]
fn file_layer(
    debug_flags: &CrateDebugFlags,
    options: &LoggingOptions,
    base_log_dir: &Path,
) -> Result<(
    BoxedLayer,
    tracing_appender::non_blocking::WorkerGuard,
    PathBuf,
)> {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let run_folder = base_log_dir.join(format!("run_{}", timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_runs(base_log_dir, options.retention_runs)?;

    let appender = tracing_appender::rolling::daily(&run_folder, "cts.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(build_filter(debug_flags, &options.level)?)
        .boxed();

    Ok((layer, guard, run_folder))
}

/// Remove all but the `retention_runs` most recent `run_*` folders
///
/// Folder names sort chronologically, so no timestamp parsing is needed.
#[cfg(feature = "file-logging")]
fn cleanup_old_runs(base_log_dir: &Path, retention_runs: usize) -> Result<()> {
    let mut runs: Vec<PathBuf> = std::fs::read_dir(base_log_dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with("run_"))
        })
        .collect();
    runs.sort();

    let excess = runs.len().saturating_sub(retention_runs);
    for path in runs.iter().take(excess) {
        if let Err(e) = std::fs::remove_dir_all(path) {
            eprintln!("Warning: Failed to remove old log directory {}: {}", path.display(), e);
        }
    }
    Ok(())
}
