//! # CTS Telemetry Serialization
//!
//! Decodes the raw frames a CTS thermal sensor sends over SPI. A frame is four back-to-back
//! sections, each closed by a little endian CRC-16/CCITT-FALSE of its payload:
//!
//! | Section | Payload | Bytes |
//! |---|---|---|
//! | [`SectionKind::Thermal`] | 15x20 <8,8> samples | 602 |
//! | [`SectionKind::Metadata`] | 64 register words | 258 |
//! | [`SectionKind::Foreground`] | 15x20 <8,8> samples | 602 |
//! | [`SectionKind::Detections`] | 21 detection records | 422 |
//!
//! [`decode_frame`] checks every section on its own and returns a [`FrameResult`] holding a
//! [`SectionOutcome`] per section, so one corrupted section never discards the rest of the frame.
//! [`encode_frame`] builds frames for replay captures and tests.

pub mod crc;
mod frame;
mod implementations;
mod section;
mod section_kind;
mod section_payload;

pub use frame::{decode_frame, encode_frame, FrameResult, TelemetrySnapshot, FRAME_BYTE_COUNT};
pub use section::{decode_section, encode_section, split_section, ChecksumFailure, SectionOutcome};
pub use section_kind::{SectionKind, CHECKSUM_BYTE_COUNT, DETECTION_RECORD_BYTE_COUNT};
pub use section_payload::SectionPayload;
