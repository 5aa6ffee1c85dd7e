use crate::section::{decode_section, encode_section, ChecksumFailure, SectionOutcome};
use crate::SectionKind;
use cts_structures::registers::RegisterMap;
use cts_structures::{CtsDataError, DetectionList, PixelGrid};
use serde::Serialize;
use tracing::debug;

/// Total length of one raw frame
pub const FRAME_BYTE_COUNT: usize = SectionKind::Thermal.byte_count()
    + SectionKind::Metadata.byte_count()
    + SectionKind::Foreground.byte_count()
    + SectionKind::Detections.byte_count();

/// Per-section outcome of decoding one frame. Always carries all four sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameResult {
    pub thermal: SectionOutcome<PixelGrid>,
    pub metadata: SectionOutcome<RegisterMap>,
    pub foreground: SectionOutcome<PixelGrid>,
    pub detections: SectionOutcome<DetectionList>,
}

impl FrameResult {
    /// Every checksum failure in wire order
    pub fn failures(&self) -> Vec<ChecksumFailure> {
        [
            self.thermal.failure(),
            self.metadata.failure(),
            self.foreground.failure(),
            self.detections.failure(),
        ]
        .into_iter()
        .flatten()
        .copied()
        .collect()
    }

    pub fn is_fully_valid(&self) -> bool {
        self.thermal.is_valid()
            && self.metadata.is_valid()
            && self.foreground.is_valid()
            && self.detections.is_valid()
    }

    /// The decoded frame, if and only if every section passed its checksum.
    pub fn into_snapshot(self) -> Option<TelemetrySnapshot> {
        Some(TelemetrySnapshot {
            thermal: self.thermal.into_payload()?,
            metadata: self.metadata.into_payload()?,
            foreground: self.foreground.into_payload()?,
            detections: self.detections.into_payload()?,
        })
    }
}

/// One fully decoded frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub thermal: PixelGrid,
    pub metadata: RegisterMap,
    pub foreground: PixelGrid,
    pub detections: DetectionList,
}

/// Decodes a raw frame of exactly [`FRAME_BYTE_COUNT`] bytes.
///
/// A wrong length fails before any section is looked at. Otherwise all four sections are checked
/// independently and the result reports each one as valid or as a checksum failure.
///
/// # Example
/// ```
/// use cts_serialization::{decode_frame, encode_frame, TelemetrySnapshot, FRAME_BYTE_COUNT};
///
/// let mut bytes = encode_frame(&TelemetrySnapshot::default()).unwrap();
/// assert_eq!(bytes.len(), FRAME_BYTE_COUNT);
///
/// bytes[0] ^= 0x01; // corrupt the thermal image
/// let result = decode_frame(&bytes).unwrap();
/// assert_eq!(result.failures().len(), 1);
/// assert!(result.metadata.is_valid());
///
/// assert!(decode_frame(&bytes[1..]).is_err());
/// ```
pub fn decode_frame(raw: &[u8]) -> Result<FrameResult, CtsDataError> {
    if raw.len() != FRAME_BYTE_COUNT {
        return Err(CtsDataError::size_mismatch("telemetry frame", FRAME_BYTE_COUNT, raw.len()));
    }

    let result = FrameResult {
        thermal: decode_section(SectionKind::Thermal, &raw[SectionKind::Thermal.byte_range()])?,
        metadata: decode_section(SectionKind::Metadata, &raw[SectionKind::Metadata.byte_range()])?,
        foreground: decode_section(
            SectionKind::Foreground,
            &raw[SectionKind::Foreground.byte_range()],
        )?,
        detections: decode_section(
            SectionKind::Detections,
            &raw[SectionKind::Detections.byte_range()],
        )?,
    };
    debug!(failed_sections = result.failures().len(), "decoded frame");
    Ok(result)
}

/// Builds a raw frame with correct checksums for every section.
///
/// Fails with a range error when an image holds a value outside the <8,8> range.
pub fn encode_frame(snapshot: &TelemetrySnapshot) -> Result<Vec<u8>, CtsDataError> {
    let mut bytes = vec![0u8; FRAME_BYTE_COUNT];
    encode_section(
        SectionKind::Thermal,
        &snapshot.thermal,
        &mut bytes[SectionKind::Thermal.byte_range()],
    )?;
    encode_section(
        SectionKind::Metadata,
        &snapshot.metadata,
        &mut bytes[SectionKind::Metadata.byte_range()],
    )?;
    encode_section(
        SectionKind::Foreground,
        &snapshot.foreground,
        &mut bytes[SectionKind::Foreground.byte_range()],
    )?;
    encode_section(
        SectionKind::Detections,
        &snapshot.detections,
        &mut bytes[SectionKind::Detections.byte_range()],
    )?;
    Ok(bytes)
}
