// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Source of raw telemetry frames
///
/// On the device this is one SPI read transaction of a whole frame. Bus clock, mode and
/// chip-select handling belong to the implementation.
pub trait SpiTransport {
    /// Platform-specific error type
    type Error;

    /// Fill `rx` with the next frame
    ///
    /// # Arguments
    /// * `rx` - Buffer the size of one frame
    ///
    /// # Returns
    /// Ok(()) once `rx` holds a whole frame, or error
    fn read_frame(&mut self, rx: &mut [u8]) -> Result<(), Self::Error>;

    /// Human readable name of the source, used in logs
    fn name(&self) -> &str;
}
