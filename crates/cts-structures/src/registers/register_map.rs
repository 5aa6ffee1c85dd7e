use super::schema::{DecodedRegister, FieldValue};
use super::table::*;
use super::schema_for;
use crate::{CtsDataError, FixedPointFormat};
use serde::Serialize;

/// CIS frame rate settings carried in `CTS_CTRL.FRAME_RATE_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FrameRateMode {
    /// 60 FPS (default)
    Fps60,
    Fps32,
    Fps8,
    Fps1,
    /// A mode value this code base does not know about
    Unknown(u8),
}

impl FrameRateMode {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => FrameRateMode::Fps60,
            1 => FrameRateMode::Fps32,
            2 => FrameRateMode::Fps8,
            3 => FrameRateMode::Fps1,
            other => FrameRateMode::Unknown(other as u8),
        }
    }

    pub fn frames_per_second(&self) -> Option<u32> {
        match self {
            FrameRateMode::Fps60 => Some(60),
            FrameRateMode::Fps32 => Some(32),
            FrameRateMode::Fps8 => Some(8),
            FrameRateMode::Fps1 => Some(1),
            FrameRateMode::Unknown(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl std::fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The 64 metadata registers of one frame, decoded against the register schema.
///
/// # Example
/// ```
/// use cts_structures::registers::{FieldValue, RegisterMap, FrameRateMode};
///
/// let mut map = RegisterMap::new_zeroed();
/// map.set_fields(0x1F, &[("FRAME_RATE_MODE", FieldValue::Unsigned(2))]).unwrap();
/// assert_eq!(map.frame_rate_mode(), FrameRateMode::Fps8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterMap {
    registers: Vec<DecodedRegister>,
}

impl RegisterMap {
    pub fn from_words(words: &[u32; NUM_REGISTERS]) -> Self {
        Self {
            registers: REGISTER_SCHEMAS
                .iter()
                .zip(words.iter())
                .map(|(schema, word)| schema.decode(*word))
                .collect(),
        }
    }

    pub fn new_zeroed() -> Self {
        Self::from_words(&[0u32; NUM_REGISTERS])
    }

    pub fn registers(&self) -> &[DecodedRegister] {
        &self.registers
    }

    pub fn register(&self, address: u8) -> Result<&DecodedRegister, CtsDataError> {
        schema_for(address)?;
        Ok(&self.registers[address as usize])
    }

    /// Raw words in address order
    pub fn words(&self) -> [u32; NUM_REGISTERS] {
        let mut words = [0u32; NUM_REGISTERS];
        for (word, register) in words.iter_mut().zip(&self.registers) {
            *word = register.raw();
        }
        words
    }

    pub fn set_word(&mut self, address: u8, word: u32) -> Result<(), CtsDataError> {
        let schema = schema_for(address)?;
        self.registers[address as usize] = schema.decode(word);
        Ok(())
    }

    /// Updates named fields of one register, leaving all other bits of the word as they were.
    pub fn set_fields(
        &mut self,
        address: u8,
        values: &[(&str, FieldValue)],
    ) -> Result<(), CtsDataError> {
        let schema = schema_for(address)?;
        let word = schema.encode_fields(values, self.registers[address as usize].raw())?;
        self.registers[address as usize] = schema.decode(word);
        Ok(())
    }

    fn raw(&self, address: u8) -> u32 {
        self.registers[address as usize].raw()
    }

    /// CMOS image sensor temperature in degrees
    pub fn sensor_temperature(&self) -> f64 {
        FixedPointFormat::Q8_8.extract(TEMP_SENSOR_TEMPERATURE.bits, self.raw(ADDR_TEMP_SENSOR))
    }

    pub fn global_frame_count(&self) -> u32 {
        GLOBAL_FRM_CNT_FRAME_COUNT.bits.extract_unsigned(self.raw(ADDR_GLOBAL_FRM_CNT))
    }

    pub fn serial_number(&self) -> u64 {
        let lo = SERIAL_NUMBER_LO.bits.extract_unsigned(self.raw(ADDR_SERIAL_NUMBER_LO)) as u64;
        let hi = SERIAL_NUMBER_HI.bits.extract_unsigned(self.raw(ADDR_SERIAL_NUMBER_HI)) as u64;
        (hi << 32) | lo
    }

    pub fn firmware_version(&self) -> FirmwareVersion {
        let word = self.raw(ADDR_FW_VERSION);
        FirmwareVersion {
            major: FW_VERSION_MAJOR.bits.extract_unsigned(word) as u8,
            minor: FW_VERSION_MINOR.bits.extract_unsigned(word) as u8,
            patch: FW_VERSION_PATCH.bits.extract_unsigned(word) as u8,
        }
    }

    pub fn frame_rate_mode(&self) -> FrameRateMode {
        FrameRateMode::from_raw(CTS_CTRL_FRAME_RATE_MODE.bits.extract_unsigned(self.raw(ADDR_CTS_CTRL)))
    }

    /// Number of frames the sensor averages, `2^NUM_FRAMES_TO_AVG`
    pub fn frames_averaged(&self) -> u32 {
        1 << CTS_CTRL_NUM_FRAMES_TO_AVG.bits.extract_unsigned(self.raw(ADDR_CTS_CTRL))
    }

    /// (rows, columns) reported by the sensor
    pub fn ir_resolution(&self) -> (u8, u8) {
        let word = self.raw(ADDR_IR_RESOLUTION);
        (
            IR_RESOLUTION_ROWS.bits.extract_unsigned(word) as u8,
            IR_RESOLUTION_COLS.bits.extract_unsigned(word) as u8,
        )
    }
}

impl Default for RegisterMap {
    fn default() -> Self {
        Self::new_zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors() {
        let mut words = [0u32; NUM_REGISTERS];
        words[ADDR_TEMP_SENSOR as usize] = 0xABCD_1980; // 25.5 degrees, upper half unimplemented
        words[ADDR_GLOBAL_FRM_CNT as usize] = 1234;
        words[ADDR_SERIAL_NUMBER_LO as usize] = 0x9ABC_DEF0;
        words[ADDR_SERIAL_NUMBER_HI as usize] = 0x1234_5678;
        words[ADDR_FW_VERSION as usize] = 0x0003_0201;
        words[ADDR_CTS_CTRL as usize] = 0x0000_1300;
        words[ADDR_IR_RESOLUTION as usize] = 0x0000_140F;
        let map = RegisterMap::from_words(&words);

        assert_eq!(map.sensor_temperature(), 25.5);
        assert_eq!(map.global_frame_count(), 1234);
        assert_eq!(map.serial_number(), 0x1234_5678_9ABC_DEF0);
        assert_eq!(map.firmware_version().to_string(), "3.2.1");
        assert_eq!(map.frame_rate_mode(), FrameRateMode::Fps32);
        assert_eq!(map.frames_averaged(), 8);
        assert_eq!(map.ir_resolution(), (15, 20));
        assert_eq!(map.words(), words);
    }

    #[test]
    fn test_set_fields_preserves_reserved_bits() {
        let mut map = RegisterMap::new_zeroed();
        map.set_word(ADDR_CTS_CTRL, 0x4000_0004).unwrap(); // _reserved30 and _reserved2 set
        map.set_fields(ADDR_CTS_CTRL, &[("DISABLE_IMG_PROC", FieldValue::Unsigned(1))])
            .unwrap();
        assert_eq!(map.register(ADDR_CTS_CTRL).unwrap().raw(), 0xC000_0004);
    }

    #[test]
    fn test_unknown_frame_rate_mode() {
        assert_eq!(FrameRateMode::from_raw(9), FrameRateMode::Unknown(9));
        assert_eq!(FrameRateMode::Unknown(9).frames_per_second(), None);
    }

    #[test]
    fn test_out_of_map_address() {
        let map = RegisterMap::new_zeroed();
        assert!(map.register(0x40).is_err());
    }
}
