//! Tests for CTS telemetry frame decoding
//!
//! Frames are built with `encode_frame` and then damaged in place to exercise the per-section
//! checksum handling of `decode_frame`.

use cts_serialization::{
    crc, decode_frame, encode_frame, SectionKind, SectionOutcome, TelemetrySnapshot,
    FRAME_BYTE_COUNT,
};
use cts_structures::registers::{FieldValue, RegisterMap, ADDR_CTS_CTRL, ADDR_GLOBAL_FRM_CNT};
use cts_structures::{CtsDataError, CvDetection, DetectionList, PixelGrid, PIXEL_COUNT};
use proptest::prelude::*;

fn sample_snapshot() -> TelemetrySnapshot {
    let mut metadata = RegisterMap::new_zeroed();
    metadata.set_word(ADDR_GLOBAL_FRM_CNT, 42).unwrap();
    metadata
        .set_fields(
            ADDR_CTS_CTRL,
            &[
                ("NUM_FRAMES_TO_AVG", FieldValue::Unsigned(3)),
                ("FRAME_RATE_MODE", FieldValue::Unsigned(1)),
            ],
        )
        .unwrap();

    TelemetrySnapshot {
        thermal: PixelGrid::from_fn(|row, col| 20.0 + (row * 20 + col) as f32 / 16.0),
        metadata,
        foreground: PixelGrid::from_fn(|row, col| if row == 7 && col > 9 { 1.0 } else { 0.0 }),
        detections: DetectionList::from_leading(&[
            CvDetection { id: 1, label: 1, peak_temperature: 36.5, ..Default::default() },
            CvDetection { id: 2, label: 3, frames_since_motion: 12, ..Default::default() },
        ])
        .unwrap(),
    }
}

#[test]
fn test_encoded_frame_decodes_fully() {
    let snapshot = sample_snapshot();
    let bytes = encode_frame(&snapshot).unwrap();
    assert_eq!(bytes.len(), FRAME_BYTE_COUNT);

    let result = decode_frame(&bytes).unwrap();
    assert!(result.is_fully_valid());
    assert!(result.failures().is_empty());
    let decoded = result.into_snapshot().unwrap();
    assert_eq!(decoded, snapshot);
    assert_eq!(decoded.metadata.global_frame_count(), 42);
}

#[test]
fn test_thermal_reference_vector() {
    let thermal = PixelGrid::from_raw_samples(&[256i16; PIXEL_COUNT]).unwrap();
    let bytes = encode_frame(&TelemetrySnapshot { thermal, ..Default::default() }).unwrap();

    let thermal_bytes = &bytes[SectionKind::Thermal.byte_range()];
    assert!(thermal_bytes[..600].chunks(2).all(|sample| sample == [0x00, 0x01]));
    // CRC-16/CCITT-FALSE of 300 x 0x0100 little endian is 0x2DD8
    assert_eq!(&thermal_bytes[600..], &[0xD8, 0x2D]);

    let result = decode_frame(&bytes).unwrap();
    let grid = result.thermal.payload().unwrap();
    assert!(grid.values().iter().all(|value| *value == 1.0));
    assert_eq!(grid.values().dim(), (15, 20));
}

#[test]
fn test_single_corrupted_checksum_is_isolated() {
    let clean = encode_frame(&sample_snapshot()).unwrap();

    for kind in SectionKind::ALL {
        let mut bytes = clean.clone();
        let checksum_start = kind.byte_range().end - 2;
        bytes[checksum_start] ^= 0xFF;
        bytes[checksum_start + 1] ^= 0x5A;

        let result = decode_frame(&bytes).unwrap();
        let failures = result.failures();
        assert_eq!(failures.len(), 1, "corrupting {kind}");
        assert_eq!(failures[0].section, kind);
        assert_eq!(failures[0].expected, crc::compute(&clean[kind.offset()..checksum_start]));
        assert_eq!(
            failures[0].actual,
            u16::from_le_bytes([bytes[checksum_start], bytes[checksum_start + 1]])
        );

        let valid = [
            result.thermal.is_valid(),
            result.metadata.is_valid(),
            result.foreground.is_valid(),
            result.detections.is_valid(),
        ];
        assert_eq!(valid.iter().filter(|v| **v).count(), 3);
        assert!(!valid[kind as usize]);
        assert!(result.into_snapshot().is_none());
    }
}

#[test]
fn test_wrong_frame_length_fails_before_any_section() {
    let bytes = encode_frame(&sample_snapshot()).unwrap();

    let short = decode_frame(&bytes[..FRAME_BYTE_COUNT - 1]);
    assert_eq!(
        short,
        Err(CtsDataError::SizeMismatch {
            context: "telemetry frame".into(),
            expected: FRAME_BYTE_COUNT,
            actual: FRAME_BYTE_COUNT - 1,
        })
    );

    let mut long = bytes.clone();
    long.push(0);
    assert!(matches!(decode_frame(&long), Err(CtsDataError::SizeMismatch { .. })));
    assert!(matches!(decode_frame(&[]), Err(CtsDataError::SizeMismatch { actual: 0, .. })));
}

#[test]
fn test_every_single_bit_flip_is_detected() {
    let clean = encode_frame(&sample_snapshot()).unwrap();

    for kind in SectionKind::ALL {
        let payload = kind.offset()..kind.offset() + kind.payload_byte_count();
        for position in payload {
            let mut bytes = clean.clone();
            bytes[position] ^= 1 << (position % 8);
            let failures = decode_frame(&bytes).unwrap().failures();
            assert_eq!(failures.len(), 1, "flip at byte {position} went unnoticed");
            assert_eq!(failures[0].section, kind);
        }
    }
}

#[test]
fn test_detection_order_is_preserved() {
    let detections: Vec<CvDetection> = (1..=21u8)
        .rev()
        .map(|id| CvDetection { id, temperature_centre_location_x: id % 20, ..Default::default() })
        .collect();
    let snapshot = TelemetrySnapshot {
        detections: DetectionList::from_leading(&detections).unwrap(),
        ..Default::default()
    };

    let decoded = decode_frame(&encode_frame(&snapshot).unwrap()).unwrap();
    let ids: Vec<u8> = decoded.detections.payload().unwrap().records().iter().map(|d| d.id).collect();
    assert_eq!(ids, (1..=21u8).rev().collect::<Vec<_>>());
}

#[test]
fn test_concurrent_decodes_are_independent() {
    let clean = encode_frame(&sample_snapshot()).unwrap();
    let mut corrupted = clean.clone();
    corrupted[SectionKind::Metadata.offset() + 8] ^= 0x10;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|index| {
                let bytes = if index % 2 == 0 { &clean } else { &corrupted };
                scope.spawn(move || decode_frame(bytes).unwrap().failures().len())
            })
            .collect();
        for (index, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), index % 2);
        }
    });
}

#[test]
fn test_out_of_range_image_does_not_encode() {
    let snapshot = TelemetrySnapshot {
        foreground: PixelGrid::from_fn(|_, _| -200.0),
        ..Default::default()
    };
    assert!(matches!(encode_frame(&snapshot), Err(CtsDataError::RangeError { .. })));
}

#[test]
fn test_frame_result_serializes_outcomes() {
    let mut bytes = encode_frame(&sample_snapshot()).unwrap();
    bytes[SectionKind::Detections.offset()] ^= 0x01;
    let result = decode_frame(&bytes).unwrap();
    assert!(matches!(result.detections, SectionOutcome::ChecksumFailed(_)));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["detections"]["status"], "checksum_failed");
    assert_eq!(json["detections"]["value"]["section"], "Detections");
    assert_eq!(json["thermal"]["status"], "valid");
    assert_eq!(json["thermal"]["value"]["shape"], serde_json::json!([15, 20]));
}

proptest! {
    #[test]
    fn arbitrary_frames_always_yield_four_outcomes(bytes in proptest::collection::vec(any::<u8>(), FRAME_BYTE_COUNT)) {
        let result = decode_frame(&bytes).unwrap();
        for failure in result.failures() {
            let range = failure.section.byte_range();
            let payload = &bytes[range.start..range.end - 2];
            prop_assert_eq!(failure.expected, crc::compute(payload));
            prop_assert_ne!(failure.expected, failure.actual);
        }
    }
}
