//! Metadata section: 64 little endian u32 register words in address order.

use crate::SectionPayload;
use byteorder::{ByteOrder, LittleEndian};
use cts_structures::registers::{RegisterMap, NUM_REGISTERS};
use cts_structures::CtsDataError;

impl SectionPayload for RegisterMap {
    const PAYLOAD_BYTE_COUNT: usize = NUM_REGISTERS * size_of::<u32>();
    const PAYLOAD_NAME: &'static str = "register map payload";

    fn try_write_to_payload(&self, byte_destination: &mut [u8]) -> Result<(), CtsDataError> {
        Self::verify_payload_length(byte_destination)?;
        LittleEndian::write_u32_into(&self.words(), byte_destination);
        Ok(())
    }

    fn try_read_from_payload(byte_source: &[u8]) -> Result<Self, CtsDataError> {
        Self::verify_payload_length(byte_source)?;
        let mut words = [0u32; NUM_REGISTERS];
        LittleEndian::read_u32_into(byte_source, &mut words);
        Ok(RegisterMap::from_words(&words))
    }
}
