//! The poll loop behind `cts_player`.
//!
//! Reads one frame per poll, decodes it and reports it. Checksum failures are logged and counted
//! but never stop the loop. See [`StopReason`] for what does.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use cts_config::{OutputFormat, PlayerConfig};
use cts_hal::SpiTransport;
use cts_serialization::{decode_frame, FrameResult, SectionKind, FRAME_BYTE_COUNT};

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    Interrupted,
    FrameLimit,
    EndOfStream,
}

/// Counters kept over a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub frames_read: u64,
    pub fully_valid_frames: u64,
    section_failures: [u64; 4],
    pub stop_reason: StopReason,
}

impl PlayerSummary {
    fn new() -> Self {
        Self {
            frames_read: 0,
            fully_valid_frames: 0,
            section_failures: [0; 4],
            stop_reason: StopReason::EndOfStream,
        }
    }

    pub fn failures_for(&self, section: SectionKind) -> u64 {
        self.section_failures[section as usize]
    }

    pub fn total_failures(&self) -> u64 {
        self.section_failures.iter().sum()
    }
}

#[derive(Serialize)]
struct FrameReport<'a> {
    frame: u64,
    #[serde(flatten)]
    result: &'a FrameResult,
}

fn open_recorder(config: &PlayerConfig) -> Result<Option<BufWriter<File>>> {
    let Some(path) = config.record_path() else {
        return Ok(None);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open record file {}", path.display()))?;
    info!(record = %path.display(), "Recording raw frames");
    Ok(Some(BufWriter::new(file)))
}

fn write_text_report(
    out: &mut impl Write,
    frame: u64,
    result: &FrameResult,
    config: &PlayerConfig,
) -> std::io::Result<()> {
    write!(out, "Frame {frame}:")?;
    match result.thermal.payload() {
        Some(thermal) => write!(
            out,
            " thermal min {:.2} max {:.2} mean {:.2}",
            thermal.min(),
            thermal.max(),
            thermal.mean()
        )?,
        None => write!(out, " thermal unavailable")?,
    }
    if let Some(metadata) = result.metadata.payload() {
        write!(
            out,
            " | sensor {:.2} C | frame count {}",
            metadata.sensor_temperature(),
            metadata.global_frame_count()
        )?;
    }
    writeln!(out)?;

    if config.print_detections {
        if let Some(detections) = result.detections.payload() {
            for detection in detections.populated() {
                writeln!(
                    out,
                    "  detection id={} label={} centre=({}, {}) peak={:.2} foot=({:.2}, {:.2}) frames_since_motion={}",
                    detection.id,
                    detection.label,
                    detection.temperature_centre_location_x,
                    detection.temperature_centre_location_y,
                    detection.peak_temperature,
                    detection.foot_position_estimate_x,
                    detection.foot_position_estimate_y,
                    detection.frames_since_motion
                )?;
            }
        }
    }
    Ok(())
}

fn report_frame(
    out: &mut impl Write,
    frame: u64,
    result: &FrameResult,
    config: &PlayerConfig,
) -> Result<()> {
    match config.output {
        OutputFormat::Text => write_text_report(out, frame, result, config)?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &FrameReport { frame, result })?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Poll `transport` until stopped.
///
/// # Arguments
/// * `transport` - Frame source
/// * `config` - Poll interval, frame limit, output settings
/// * `running` - Cleared by the Ctrl-C handler
/// * `out` - Receives one report per frame
/// * `is_end_of_stream` - Tells a clean end of the source apart from a transport failure
pub fn run_player<T, W>(
    transport: &mut T,
    config: &PlayerConfig,
    running: &AtomicBool,
    out: &mut W,
    is_end_of_stream: impl Fn(&T::Error) -> bool,
) -> Result<PlayerSummary>
where
    T: SpiTransport,
    T::Error: std::error::Error + Send + Sync + 'static,
    W: Write,
{
    let mut summary = PlayerSummary::new();
    let mut recorder = open_recorder(config)?;
    let mut rx = vec![0u8; FRAME_BYTE_COUNT];

    info!(transport = transport.name(), "Polling for frames");

    summary.stop_reason = loop {
        if !running.load(Ordering::SeqCst) {
            break StopReason::Interrupted;
        }
        if config.frame_limit().is_some_and(|limit| summary.frames_read >= limit) {
            break StopReason::FrameLimit;
        }

        match transport.read_frame(&mut rx) {
            Ok(()) => {}
            Err(err) if is_end_of_stream(&err) => {
                info!(transport = transport.name(), "{}", err);
                break StopReason::EndOfStream;
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read from {}", transport.name()));
            }
        }
        summary.frames_read += 1;

        if let Some(recorder) = recorder.as_mut() {
            recorder.write_all(&rx).context("Failed to record frame")?;
        }

        let result = decode_frame(&rx)?;
        let failures = result.failures();
        for failure in &failures {
            warn!(
                section = %failure.section,
                expected = %format_args!("0x{:04X}", failure.expected),
                actual = %format_args!("0x{:04X}", failure.actual),
                "{}",
                failure
            );
            summary.section_failures[failure.section as usize] += 1;
        }
        if failures.is_empty() {
            summary.fully_valid_frames += 1;
        }
        debug!(frame = summary.frames_read, failed_sections = failures.len(), "Frame processed");

        report_frame(out, summary.frames_read, &result, config)?;

        if !config.poll_interval().is_zero() {
            thread::sleep(config.poll_interval());
        }
    };

    if let Some(mut recorder) = recorder {
        recorder.flush().context("Failed to flush record file")?;
    }
    out.flush()?;

    info!(
        frames_read = summary.frames_read,
        fully_valid = summary.fully_valid_frames,
        thermal_failures = summary.failures_for(SectionKind::Thermal),
        metadata_failures = summary.failures_for(SectionKind::Metadata),
        foreground_failures = summary.failures_for(SectionKind::Foreground),
        detection_failures = summary.failures_for(SectionKind::Detections),
        stop_reason = ?summary.stop_reason,
        "Player stopped"
    );
    Ok(summary)
}
