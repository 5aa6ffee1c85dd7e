// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
CTS Telemetry Player

Polls a frame source, decodes every frame and prints what survived the section checksums.
Stops on Ctrl-C, after `--max-frames` frames, or at the end of a non-looping capture.

Usage:
  cargo run --bin cts_player -- [--synthetic | --capture <frames.bin>] [options]

Example:
  cargo run --bin cts_player -- --synthetic --max-frames 20 --record session.bin
  cargo run --bin cts_player -- --capture session.bin --json --debug cts-serialization

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use std::collections::HashMap;
use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use cts_telemetry::config::{
    load_config, load_config_or_default, validate_config, CtsConfig, OutputFormat, TransportKind,
};
use cts_telemetry::hal::{ReplayTransport, SyntheticTransport};
use cts_telemetry::observability::{
    debug_flags_help, init_logging, parse_debug_flags, CrateDebugFlags, LoggingOptions,
};
use cts_telemetry::player::{run_player, PlayerSummary};

/// CTS Telemetry Player - decode and display CTS sensor frames
#[derive(Parser, Debug)]
#[command(name = "cts_player", version, long_about = None, after_help = debug_flags_help())]
struct Args {
    /// Configuration file (searched for when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay frames from a capture file
    #[arg(long, conflicts_with = "synthetic")]
    capture: Option<PathBuf>,

    /// Generate synthetic frames instead of reading a capture
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Rewind the capture instead of stopping at its end
    #[arg(long, default_value_t = false)]
    loop_capture: bool,

    /// Stop after this many frames (0 = no limit)
    #[arg(long)]
    max_frames: Option<u64>,

    /// Delay between polls in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Print one JSON object per frame
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Append every raw frame to this file
    #[arg(long)]
    record: Option<PathBuf>,

    /// Base log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Enable debug logging for a crate (repeatable, or "all"); `--debug-<crate>` also works
    #[arg(long = "debug", value_name = "CRATE")]
    debug: Vec<String>,
}

impl Args {
    fn cli_overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        if let Some(capture) = &self.capture {
            overrides.insert("transport_kind".to_string(), TransportKind::Replay.to_string());
            overrides.insert("capture_path".to_string(), capture.display().to_string());
        }
        if self.synthetic {
            overrides.insert("transport_kind".to_string(), TransportKind::Synthetic.to_string());
        }
        if let Some(max_frames) = self.max_frames {
            overrides.insert("max_frames".to_string(), max_frames.to_string());
        }
        if let Some(interval) = self.poll_interval_ms {
            overrides.insert("poll_interval_ms".to_string(), interval.to_string());
        }
        if self.json {
            overrides.insert("output".to_string(), "json".to_string());
        }
        if let Some(record) = &self.record {
            overrides.insert("record_path".to_string(), record.display().to_string());
        }
        if let Some(level) = &self.log_level {
            overrides.insert("log_level".to_string(), level.clone());
        }
        overrides
    }
}

fn load_player_config(args: &Args) -> Result<CtsConfig> {
    let overrides = args.cli_overrides();
    let mut config = match &args.config {
        Some(path) => load_config(Some(path), Some(&overrides))
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => load_config_or_default(Some(&overrides)).context("Failed to load configuration")?,
    };
    if args.loop_capture {
        config.transport.loop_capture = true;
    }
    validate_config(&config).context("Invalid configuration")?;
    Ok(config)
}

fn run(config: &CtsConfig, running: &AtomicBool) -> Result<PlayerSummary> {
    let mut stdout = io::stdout().lock();
    match config.transport.kind {
        TransportKind::Replay => {
            let mut transport =
                ReplayTransport::open(&config.transport.capture_path, config.transport.loop_capture)?;
            info!(frames = transport.frame_count(), "Capture loaded");
            run_player(&mut transport, &config.player, running, &mut stdout, |err| {
                err.is_exhausted()
            })
        }
        TransportKind::Synthetic => {
            let mut transport = SyntheticTransport::new(config.transport.synthetic_corrupt_every)?;
            run_player(&mut transport, &config.player, running, &mut stdout, |_| false)
        }
    }
}

fn main() -> Result<()> {
    // --debug-<crate> flags belong to the logging setup, not to clap
    let mut debug_flags = parse_debug_flags();
    let args = Args::parse_from(env::args().filter(|arg| !arg.starts_with("--debug-")));
    let config = load_player_config(&args)?;

    debug_flags.merge(CrateDebugFlags::from_crate_names(&args.debug));
    let logging = LoggingOptions {
        level: config.logging.level.clone(),
        json: config.logging.format == OutputFormat::Json,
        log_dir: config.logging.log_dir().cloned(),
        ..LoggingOptions::default()
    };
    let logging_guard = init_logging(&debug_flags, &logging)?;
    if let Some(log_dir) = logging_guard.log_dir() {
        info!(log_dir = %log_dir.display(), "Writing log files");
    }

    info!(
        version = cts_telemetry::config::VERSION,
        transport = %config.transport.kind,
        "Starting CTS telemetry player"
    );

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    ctrlc::set_handler(move || {
        handler_flag.store(false, Ordering::SeqCst);
    })
    .context("Failed to install Ctrl-C handler")?;

    let summary = run(&config, &running)?;
    if summary.total_failures() > 0 {
        warn!(
            failures = summary.total_failures(),
            frames = summary.frames_read,
            "Some sections failed their checksum"
        );
    }
    Ok(())
}
