//! Thermal and foreground images: `PIXEL_COUNT` little endian i16 samples in row-major order.

use crate::SectionPayload;
use byteorder::{ByteOrder, LittleEndian};
use cts_structures::{CtsDataError, PixelGrid, PIXEL_COUNT};

impl SectionPayload for PixelGrid {
    const PAYLOAD_BYTE_COUNT: usize = PIXEL_COUNT * size_of::<i16>();
    const PAYLOAD_NAME: &'static str = "pixel grid payload";

    fn try_write_to_payload(&self, byte_destination: &mut [u8]) -> Result<(), CtsDataError> {
        Self::verify_payload_length(byte_destination)?;
        let samples = self.to_raw_samples()?;
        LittleEndian::write_i16_into(&samples, byte_destination);
        Ok(())
    }

    fn try_read_from_payload(byte_source: &[u8]) -> Result<Self, CtsDataError> {
        Self::verify_payload_length(byte_source)?;
        let mut samples = [0i16; PIXEL_COUNT];
        LittleEndian::read_i16_into(byte_source, &mut samples);
        PixelGrid::from_raw_samples(&samples)
    }
}
