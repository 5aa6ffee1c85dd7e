//! # CTS Telemetry
//!
//! Decoder for the telemetry frames a CTS thermal imaging sensor streams over SPI. Each frame
//! carries a thermal image, 64 metadata registers, a CV foreground image and a detection list,
//! every section protected by its own CRC-16/CCITT-FALSE.
//!
//! ## Quick Start
//!
//! ```rust
//! use cts_telemetry::prelude::*;
//!
//! let raw = encode_frame(&TelemetrySnapshot::default())?;
//! let result = decode_frame(&raw)?;
//!
//! for failure in result.failures() {
//!     eprintln!("{failure}");
//! }
//! if let Some(thermal) = result.thermal.payload() {
//!     println!("hottest pixel: {:.2}", thermal.max());
//! }
//! # Ok::<(), CtsDataError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Transport: cts-hal                                     │
//! │  (SpiTransport, replay captures, synthetic frames)      │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓ raw bytes
//! ┌─────────────────────────────────────────────────────────┐
//! │  Codec: cts-serialization                               │
//! │  (CRC check per section, FrameResult)                   │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Data: cts-structures                                   │
//! │  (PixelGrid, RegisterMap, DetectionList)                │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! `cts-config` and `cts-observability` supply configuration and logging to the `cts_player` tool.
//!
//! ## License
//!
//! Apache-2.0

pub mod player;

// Re-export foundation
pub use cts_structures as structures;

// Re-export codec
pub use cts_serialization as serialization;

// Re-export infrastructure
pub use cts_config as config;
pub use cts_hal as hal;
pub use cts_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::hal::{ReplayTransport, SpiTransport, SyntheticTransport};
    pub use crate::serialization::{
        decode_frame, encode_frame, ChecksumFailure, FrameResult, SectionKind, SectionOutcome,
        TelemetrySnapshot, FRAME_BYTE_COUNT,
    };
    pub use crate::structures::registers::{FieldValue, RegisterMap};
    pub use crate::structures::{CtsDataError, CvDetection, DetectionList, PixelGrid};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_round_trip() {
        let raw = encode_frame(&TelemetrySnapshot::default()).unwrap();
        assert_eq!(raw.len(), FRAME_BYTE_COUNT);
        assert!(decode_frame(&raw).unwrap().is_fully_valid());
    }
}
