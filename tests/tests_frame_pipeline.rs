//! End to end: synthetic frames recorded by the player, replayed from disk and decoded again.

use std::sync::atomic::AtomicBool;

use cts_telemetry::config::{OutputFormat, PlayerConfig};
use cts_telemetry::player::{run_player, StopReason};
use cts_telemetry::prelude::*;

fn quick_player(max_frames: u64) -> PlayerConfig {
    PlayerConfig {
        poll_interval_ms: 0,
        max_frames,
        ..PlayerConfig::default()
    }
}

#[test]
fn test_synthetic_run_counts_failures_per_section() {
    let mut transport = SyntheticTransport::new(2).unwrap();
    let running = AtomicBool::new(true);
    let mut out = Vec::new();

    let summary = run_player(&mut transport, &quick_player(8), &running, &mut out, |_| false).unwrap();

    assert_eq!(summary.frames_read, 8);
    assert_eq!(summary.stop_reason, StopReason::FrameLimit);
    // frames 2, 4, 6 and 8 each damage the next section in wire order
    assert_eq!(summary.fully_valid_frames, 4);
    for section in SectionKind::ALL {
        assert_eq!(summary.failures_for(section), 1, "{section}");
    }

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().filter(|line| line.starts_with("Frame ")).count(), 8);
    assert!(text.contains("thermal unavailable"));
    assert!(text.contains("detection id=1"));
}

#[test]
fn test_recorded_session_replays_identically() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("session.bin");

    let mut config = quick_player(5);
    config.record_path = record.clone();
    let mut synthetic = SyntheticTransport::new(0).unwrap();
    let running = AtomicBool::new(true);
    run_player(&mut synthetic, &config, &running, &mut Vec::new(), |_| false).unwrap();

    let mut replay = ReplayTransport::open(&record, false).unwrap();
    assert_eq!(replay.frame_count(), 5);

    let reference = SyntheticTransport::new(0).unwrap();
    let mut rx = vec![0u8; FRAME_BYTE_COUNT];
    for index in 0..5u32 {
        replay.read_frame(&mut rx).unwrap();
        assert_eq!(rx, encode_frame(&reference.snapshot(index).unwrap()).unwrap());
        let snapshot = decode_frame(&rx).unwrap().into_snapshot().unwrap();
        assert_eq!(snapshot.metadata.global_frame_count(), index);
    }
}

#[test]
fn test_replay_run_stops_at_end_of_capture() {
    let mut synthetic = SyntheticTransport::new(0).unwrap();
    let mut capture = Vec::new();
    let mut rx = vec![0u8; FRAME_BYTE_COUNT];
    for _ in 0..3 {
        synthetic.read_frame(&mut rx).unwrap();
        capture.extend_from_slice(&rx);
    }
    let mut replay = ReplayTransport::from_bytes("memory", capture, false).unwrap();

    let mut config = quick_player(0);
    config.output = OutputFormat::Json;
    let running = AtomicBool::new(true);
    let mut out = Vec::new();
    let summary =
        run_player(&mut replay, &config, &running, &mut out, |err| err.is_exhausted()).unwrap();

    assert_eq!(summary.frames_read, 3);
    assert_eq!(summary.stop_reason, StopReason::EndOfStream);

    let text = String::from_utf8(out).unwrap();
    let reports: Vec<serde_json::Value> =
        text.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[2]["frame"], 3);
    assert_eq!(reports[0]["thermal"]["status"], "valid");
    assert_eq!(reports[0]["thermal"]["value"]["shape"], serde_json::json!([15, 20]));
}

#[test]
fn test_cleared_flag_stops_before_reading() {
    let mut transport = SyntheticTransport::new(0).unwrap();
    let running = AtomicBool::new(false);
    let summary =
        run_player(&mut transport, &quick_player(0), &running, &mut Vec::new(), |_| false).unwrap();
    assert_eq!(summary.frames_read, 0);
    assert_eq!(summary.stop_reason, StopReason::Interrupted);
    assert_eq!(transport.frame_index(), 0);
}

#[test]
fn test_corrupted_checksum_is_reported_not_fatal() {
    let mut raw = encode_frame(&TelemetrySnapshot::default()).unwrap();
    let metadata_checksum = SectionKind::Metadata.byte_range().end - 1;
    raw[metadata_checksum] ^= 0x01;

    let result = decode_frame(&raw).unwrap();
    let failures = result.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].section, SectionKind::Metadata);
    assert!(result.thermal.is_valid());
    assert!(result.detections.is_valid());
    assert!(result.into_snapshot().is_none());
}
