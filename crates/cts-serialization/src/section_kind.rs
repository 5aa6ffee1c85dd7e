use cts_structures::registers::NUM_REGISTERS;
use cts_structures::{MAX_NUM_DETECTIONS, PIXEL_COUNT};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::ops::Range;

/// Bytes of the trailing checksum that closes every section
pub const CHECKSUM_BYTE_COUNT: usize = size_of::<u16>();

/// Bytes of one detection record on the wire
pub const DETECTION_RECORD_BYTE_COUNT: usize = 20;

/// The four independently checksummed sections of a frame, in wire order.
///
/// # Example
/// ```
/// use cts_serialization::SectionKind;
///
/// assert_eq!(SectionKind::Thermal.byte_count(), 602);
/// assert_eq!(SectionKind::Metadata.offset(), 602);
/// assert_eq!(SectionKind::Detections.byte_range().end, 1884);
/// ```
#[repr(u8)]
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, Serialize)]
pub enum SectionKind {
    /// 15x20 <8,8> thermal image
    Thermal = 0u8,
    /// 64 register words
    Metadata = 1u8,
    /// 15x20 <8,8> CV foreground image
    Foreground = 2u8,
    /// 21 detection records
    Detections = 3u8,
}

impl SectionKind {
    /// All sections in the order they appear on the wire
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Thermal,
        SectionKind::Metadata,
        SectionKind::Foreground,
        SectionKind::Detections,
    ];

    /// Bytes covered by the checksum
    pub const fn payload_byte_count(&self) -> usize {
        match self {
            SectionKind::Thermal | SectionKind::Foreground => PIXEL_COUNT * size_of::<i16>(),
            SectionKind::Metadata => NUM_REGISTERS * size_of::<u32>(),
            SectionKind::Detections => MAX_NUM_DETECTIONS * DETECTION_RECORD_BYTE_COUNT,
        }
    }

    /// Payload plus trailing checksum
    pub const fn byte_count(&self) -> usize {
        self.payload_byte_count() + CHECKSUM_BYTE_COUNT
    }

    /// Byte offset of the section inside a frame
    pub const fn offset(&self) -> usize {
        let mut offset = 0;
        let mut index = 0;
        while index < *self as usize {
            offset += Self::ALL[index].byte_count();
            index += 1;
        }
        offset
    }

    pub const fn byte_range(&self) -> Range<usize> {
        self.offset()..self.offset() + self.byte_count()
    }
}

impl TryFrom<u8> for SectionKind {
    type Error = cts_structures::CtsDataError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SectionKind::ALL.get(value as usize).copied().ok_or_else(|| {
            cts_structures::CtsDataError::BadParameters(format!("Unknown frame section {}", value))
        })
    }
}

impl Display for SectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SectionKind::Thermal => "Thermal",
            SectionKind::Metadata => "Metadata",
            SectionKind::Foreground => "Foreground",
            SectionKind::Detections => "Detections",
        };
        write!(f, "{name}")
    }
}
