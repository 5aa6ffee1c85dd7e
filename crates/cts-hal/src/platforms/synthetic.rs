// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Generated frames for running the player without a sensor
//!
//! Each frame shows one warm blob walking along the middle row of the thermal image, the matching
//! foreground mask and a single detection. `GLOBAL_FRM_CNT` counts up from zero. When corruption
//! is enabled the stored checksum of one section is damaged every N frames, cycling through the
//! sections in wire order.

use crate::hal::SpiTransport;
use cts_serialization::{encode_frame, SectionKind, TelemetrySnapshot, FRAME_BYTE_COUNT};
use cts_structures::registers::{
    FieldValue, RegisterMap, ADDR_FW_VERSION, ADDR_GLOBAL_FRM_CNT, ADDR_IR_RESOLUTION,
    ADDR_TEMP_SENSOR,
};
use cts_structures::{
    CtsDataError, CvDetection, DetectionList, PixelGrid, PIXEL_HEIGHT, PIXEL_WIDTH,
};
use tracing::debug;

const AMBIENT_TEMPERATURE: f32 = 22.0;
const BLOB_AMPLITUDE: f32 = 14.0;
const BLOB_SPREAD: f32 = 4.0;
const FOREGROUND_THRESHOLD: f32 = 28.0;
const SENSOR_TEMPERATURE: f64 = 31.5;

/// Synthetic transport errors
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// Generated content failed to encode
    #[error("Failed to build synthetic frame: {0}")]
    Encoding(#[from] CtsDataError),
    /// Receive buffer is not one frame long
    #[error("Receive buffer is {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Frame generator
pub struct SyntheticTransport {
    frame_index: u32,
    corrupt_every: u32,
    corrupted_frames: usize,
    metadata: RegisterMap,
}

impl SyntheticTransport {
    /// Create a generator
    ///
    /// # Arguments
    /// * `corrupt_every` - Damage one section checksum every N frames, 0 to never corrupt
    pub fn new(corrupt_every: u32) -> Result<Self, SyntheticError> {
        let mut metadata = RegisterMap::new_zeroed();
        metadata.set_fields(
            ADDR_TEMP_SENSOR,
            &[("temperature_sensor_0", FieldValue::Real(SENSOR_TEMPERATURE))],
        )?;
        metadata.set_fields(
            ADDR_FW_VERSION,
            &[
                ("ver_major", FieldValue::Unsigned(1)),
                ("ver_minor", FieldValue::Unsigned(4)),
                ("ver_patch", FieldValue::Unsigned(0)),
            ],
        )?;
        metadata.set_fields(
            ADDR_IR_RESOLUTION,
            &[
                ("ir_rows", FieldValue::Unsigned(PIXEL_HEIGHT as u32)),
                ("ir_cols", FieldValue::Unsigned(PIXEL_WIDTH as u32)),
            ],
        )?;
        Ok(Self {
            frame_index: 0,
            corrupt_every,
            corrupted_frames: 0,
            metadata,
        })
    }

    /// Index of the next frame to be generated
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Blob position (row, column) for a frame
    fn blob_centre(frame_index: u32) -> (usize, usize) {
        (PIXEL_HEIGHT / 2, frame_index as usize % PIXEL_WIDTH)
    }

    /// Decoded content of the frame at `frame_index`, before any corruption
    pub fn snapshot(&self, frame_index: u32) -> Result<TelemetrySnapshot, SyntheticError> {
        let (centre_row, centre_col) = Self::blob_centre(frame_index);
        let thermal = PixelGrid::from_fn(|row, col| {
            let d_row = row as f32 - centre_row as f32;
            let d_col = col as f32 - centre_col as f32;
            let distance_squared = d_row * d_row + d_col * d_col;
            AMBIENT_TEMPERATURE + BLOB_AMPLITUDE * (-distance_squared / BLOB_SPREAD).exp()
        });
        let foreground = PixelGrid::from_fn(|row, col| {
            match thermal.get(row, col) {
                Some(value) if value > FOREGROUND_THRESHOLD => 1.0,
                _ => 0.0,
            }
        });
        let detection = CvDetection {
            id: 1,
            label: 1,
            temperature_centre_location_x: centre_col as u8,
            temperature_centre_location_y: centre_row as u8,
            frames_since_motion: 0,
            peak_temperature: thermal.max(),
            foot_position_estimate_x: centre_col as f32,
            foot_position_estimate_y: (centre_row + 2) as f32,
        };

        let mut metadata = self.metadata.clone();
        metadata.set_word(ADDR_GLOBAL_FRM_CNT, frame_index)?;

        Ok(TelemetrySnapshot {
            thermal,
            metadata,
            foreground,
            detections: DetectionList::from_leading(&[detection])?,
        })
    }

    /// Section whose checksum the given frame damages, if any
    fn section_to_corrupt(&self) -> Option<SectionKind> {
        if self.corrupt_every == 0 || (self.frame_index + 1) % self.corrupt_every != 0 {
            return None;
        }
        Some(SectionKind::ALL[self.corrupted_frames % SectionKind::ALL.len()])
    }
}

impl SpiTransport for SyntheticTransport {
    type Error = SyntheticError;

    fn read_frame(&mut self, rx: &mut [u8]) -> Result<(), Self::Error> {
        if rx.len() != FRAME_BYTE_COUNT {
            return Err(SyntheticError::BufferSize {
                expected: FRAME_BYTE_COUNT,
                actual: rx.len(),
            });
        }
        let frame = encode_frame(&self.snapshot(self.frame_index)?)?;
        rx.copy_from_slice(&frame);

        if let Some(section) = self.section_to_corrupt() {
            let checksum_start = section.byte_range().end - 2;
            rx[checksum_start] ^= 0xFF;
            self.corrupted_frames += 1;
            debug!(frame = self.frame_index, %section, "Corrupted synthetic section checksum");
        }
        self.frame_index = self.frame_index.wrapping_add(1);
        Ok(())
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cts_serialization::decode_frame;

    #[test]
    fn test_generated_frames_are_valid() {
        let mut transport = SyntheticTransport::new(0).unwrap();
        let mut rx = vec![0u8; FRAME_BYTE_COUNT];

        for expected_count in 0..3 {
            transport.read_frame(&mut rx).unwrap();
            let snapshot = decode_frame(&rx).unwrap().into_snapshot().unwrap();
            assert_eq!(snapshot.metadata.global_frame_count(), expected_count);
            assert_eq!(snapshot.metadata.ir_resolution(), (15, 20));
            assert_eq!(snapshot.metadata.sensor_temperature(), 31.5);
            assert_eq!(snapshot.metadata.firmware_version().to_string(), "1.4.0");

            let detections: Vec<_> = snapshot.detections.populated().collect();
            assert_eq!(detections.len(), 1);
            assert_eq!(detections[0].temperature_centre_location_x, expected_count as u8);
            assert!(snapshot.foreground.max() == 1.0);
        }
    }

    #[test]
    fn test_corruption_rotates_through_sections() {
        let mut transport = SyntheticTransport::new(2).unwrap();
        let mut rx = vec![0u8; FRAME_BYTE_COUNT];
        let mut failed_sections = Vec::new();

        for _ in 0..8 {
            transport.read_frame(&mut rx).unwrap();
            let failures = decode_frame(&rx).unwrap().failures();
            assert!(failures.len() <= 1);
            failed_sections.extend(failures.into_iter().map(|failure| failure.section));
        }
        assert_eq!(failed_sections, SectionKind::ALL.to_vec());
    }
}
