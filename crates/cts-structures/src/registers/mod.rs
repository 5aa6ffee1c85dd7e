//! Metadata register map: the data-driven address table and the codec that consumes it.
//!
//! Each of the 64 addresses maps to a [`RegisterSchema`] listing named `(bit_offset, bit_width)`
//! fields. A single generic codec walks those fields, so there is no per-register type.

mod register_map;
mod schema;
mod table;

pub use register_map::{FirmwareVersion, FrameRateMode, RegisterMap};
pub use schema::{DecodedRegister, FieldKind, FieldSchema, FieldValue, RegisterSchema};
pub use table::{
    ADDR_CTS_CTRL, ADDR_FW_VERSION, ADDR_GLOBAL_FRM_CNT, ADDR_IR_RESOLUTION,
    ADDR_SERIAL_NUMBER_HI, ADDR_SERIAL_NUMBER_LO, ADDR_TEMP_SENSOR, NUM_REGISTERS,
    REGISTER_SCHEMAS,
};

use crate::CtsDataError;

/// Looks up the schema for `address`, failing for anything outside 0x00..=0x3F.
pub fn schema_for(address: u8) -> Result<&'static RegisterSchema, CtsDataError> {
    REGISTER_SCHEMAS.get(address as usize).ok_or_else(|| {
        CtsDataError::BadParameters(format!(
            "Register address 0x{:02X} is outside the 0x00-0x{:02X} register map!",
            address,
            NUM_REGISTERS - 1
        ))
    })
}

/// Finds a register by its device name (e.g. `"CTS_CTRL"`). Reserved slots share the name
/// `RESERVED` and are not returned.
pub fn schema_by_name(name: &str) -> Option<&'static RegisterSchema> {
    REGISTER_SCHEMAS
        .iter()
        .find(|schema| !schema.is_reserved() && schema.name == name)
}

/// Decodes one register word into its named fields.
///
/// # Example
/// ```
/// use cts_structures::registers::{decode_register, FieldValue};
///
/// let decoded = decode_register(0x0000_1300, 0x1F).unwrap();
/// assert_eq!(decoded.get("NUM_FRAMES_TO_AVG"), Some(FieldValue::Unsigned(3)));
/// assert_eq!(decoded.get("FRAME_RATE_MODE"), Some(FieldValue::Unsigned(1)));
/// ```
pub fn decode_register(word: u32, address: u8) -> Result<DecodedRegister, CtsDataError> {
    Ok(schema_for(address)?.decode(word))
}

/// Encodes named field values into a word for `address`. Fields not listed are zero.
pub fn encode_register(values: &[(&str, FieldValue)], address: u8) -> Result<u32, CtsDataError> {
    schema_for(address)?.encode_fields(values, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_total_and_ordered() {
        assert_eq!(REGISTER_SCHEMAS.len(), NUM_REGISTERS);
        for (index, schema) in REGISTER_SCHEMAS.iter().enumerate() {
            assert_eq!(schema.address as usize, index, "{} is out of place", schema.name);
        }
    }

    #[test]
    fn test_fields_tile_every_word() {
        for schema in REGISTER_SCHEMAS.iter() {
            let mut covered = 0u32;
            for (index, field) in schema.fields.iter().enumerate() {
                for other in &schema.fields[index + 1..] {
                    assert!(
                        !field.bits.overlaps(&other.bits),
                        "{}: {} overlaps {}",
                        schema.name,
                        field.name,
                        other.name
                    );
                    // encode_fields resolves fields by name
                    assert_ne!(field.name, other.name, "{}: duplicate field name", schema.name);
                }
                covered |= field.bits.word_mask();
            }
            assert_eq!(covered, u32::MAX, "{} leaves bits undescribed", schema.name);
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(schema_by_name("CTS_CTRL").map(|s| s.address), Some(0x1F));
        assert_eq!(schema_by_name("BB_WIDTH").map(|s| s.address), Some(0x20));
        assert!(schema_by_name("RESERVED").is_none());
        assert!(schema_for(0x40).is_err());
    }
}
