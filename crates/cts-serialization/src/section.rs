use crate::section_kind::CHECKSUM_BYTE_COUNT;
use crate::{crc, SectionKind, SectionPayload};
use byteorder::{ByteOrder, LittleEndian};
use cts_structures::CtsDataError;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use tracing::{debug, trace};

/// A section whose stored checksum did not match the checksum of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChecksumFailure {
    pub section: SectionKind,
    /// Checksum recomputed over the received payload
    pub expected: u16,
    /// Checksum stored in the section's trailing two bytes
    pub actual: u16,
}

impl Display for ChecksumFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} CRC fail. Got: 0x{:04X} Expected: 0x{:04X}",
            self.section, self.actual, self.expected
        )
    }
}

impl std::error::Error for ChecksumFailure {}

/// Result of checking and decoding one section. A failed checksum withholds the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum SectionOutcome<T> {
    Valid(T),
    ChecksumFailed(ChecksumFailure),
}

impl<T> SectionOutcome<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, SectionOutcome::Valid(_))
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            SectionOutcome::Valid(payload) => Some(payload),
            SectionOutcome::ChecksumFailed(_) => None,
        }
    }

    pub fn into_payload(self) -> Option<T> {
        match self {
            SectionOutcome::Valid(payload) => Some(payload),
            SectionOutcome::ChecksumFailed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ChecksumFailure> {
        match self {
            SectionOutcome::Valid(_) => None,
            SectionOutcome::ChecksumFailed(failure) => Some(failure),
        }
    }
}

/// Splits a section into its payload and stored checksum.
pub fn split_section(kind: SectionKind, section_bytes: &[u8]) -> Result<(&[u8], u16), CtsDataError> {
    if section_bytes.len() != kind.byte_count() {
        return Err(CtsDataError::size_mismatch(
            format!("{} section", kind),
            kind.byte_count(),
            section_bytes.len(),
        ));
    }
    let (payload, checksum) = section_bytes.split_at(kind.payload_byte_count());
    Ok((payload, LittleEndian::read_u16(checksum)))
}

/// Checks the checksum of one section and, only when it matches, decodes the payload.
///
/// Fails only when `section_bytes` is not `kind.byte_count()` long. A checksum mismatch is
/// returned as [`SectionOutcome::ChecksumFailed`].
pub fn decode_section<T: SectionPayload>(
    kind: SectionKind,
    section_bytes: &[u8],
) -> Result<SectionOutcome<T>, CtsDataError> {
    let (payload, stored) = split_section(kind, section_bytes)?;
    let computed = crc::compute(payload);
    debug!(section = %kind, stored, computed, "checked section checksum");

    if computed != stored {
        return Ok(SectionOutcome::ChecksumFailed(ChecksumFailure {
            section: kind,
            expected: computed,
            actual: stored,
        }));
    }

    let value = T::try_read_from_payload(payload)?;
    trace!(section = %kind, bytes = payload.len(), "decoded section payload");
    Ok(SectionOutcome::Valid(value))
}

/// Writes `value` and its checksum into a slice of exactly `kind.byte_count()` bytes.
pub fn encode_section<T: SectionPayload>(
    kind: SectionKind,
    value: &T,
    section_destination: &mut [u8],
) -> Result<(), CtsDataError> {
    if section_destination.len() != kind.byte_count() {
        return Err(CtsDataError::size_mismatch(
            format!("{} section", kind),
            kind.byte_count(),
            section_destination.len(),
        ));
    }
    if T::PAYLOAD_BYTE_COUNT != kind.payload_byte_count() {
        return Err(CtsDataError::BadParameters(format!(
            "A {} cannot be written into the {} section!",
            T::PAYLOAD_NAME,
            kind
        )));
    }
    let (payload, checksum) = section_destination.split_at_mut(kind.payload_byte_count());
    value.try_write_to_payload(payload)?;
    debug_assert_eq!(checksum.len(), CHECKSUM_BYTE_COUNT);
    LittleEndian::write_u16(checksum, crc::compute(payload));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cts_structures::{DetectionList, PixelGrid};

    #[test]
    fn test_zero_payload_with_its_checksum_is_valid() {
        let mut bytes = vec![0u8; SectionKind::Detections.byte_count()];
        // CRC of 420 zero bytes, little endian
        bytes[420] = 0x78;
        bytes[421] = 0xB1;
        let outcome = decode_section::<DetectionList>(SectionKind::Detections, &bytes).unwrap();
        assert_eq!(outcome.payload().map(|list| list.populated().count()), Some(0));
    }

    #[test]
    fn test_failure_reports_both_checksums() {
        let bytes = vec![0u8; SectionKind::Thermal.byte_count()];
        let outcome = decode_section::<PixelGrid>(SectionKind::Thermal, &bytes).unwrap();
        let failure = outcome.failure().copied().unwrap();
        assert_eq!(failure.expected, 0xABF1);
        assert_eq!(failure.actual, 0x0000);
        assert_eq!(failure.to_string(), "Thermal CRC fail. Got: 0x0000 Expected: 0xABF1");
    }

    #[test]
    fn test_wrong_payload_type_for_section() {
        let mut bytes = vec![0u8; SectionKind::Metadata.byte_count()];
        let result = encode_section(SectionKind::Metadata, &PixelGrid::new_zeroed(), &mut bytes);
        assert!(matches!(result, Err(CtsDataError::BadParameters(_))));
    }
}
