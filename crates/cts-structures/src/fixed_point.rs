use crate::{BitRange, CtsDataError};
use serde::Serialize;

/// A `<I,F>` fixed-point format: `I` integer bits and `F` fractional bits stored as a plain
/// (two's complement when signed) integer of `I + F` bits.
///
/// # Example
/// ```
/// use cts_structures::FixedPointFormat;
///
/// let q8_8 = FixedPointFormat::Q8_8;
/// assert_eq!(q8_8.raw_to_real(256), 1.0);
/// assert_eq!(q8_8.real_to_raw(-1.5).unwrap(), -384);
/// assert!(q8_8.real_to_raw(128.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FixedPointFormat {
    integer_bits: u8,
    fractional_bits: u8,
    signed: bool,
}

impl FixedPointFormat {
    /// Signed <8,8>, used for every temperature the sensor reports
    pub const Q8_8: FixedPointFormat = FixedPointFormat::signed(8, 8);

    pub const fn signed(integer_bits: u8, fractional_bits: u8) -> Self {
        assert!(
            integer_bits as u16 + fractional_bits as u16 > 0,
            "fixed-point formats need at least one bit"
        );
        assert!(integer_bits as u16 + fractional_bits as u16 <= 32);
        Self { integer_bits, fractional_bits, signed: true }
    }

    pub const fn unsigned(integer_bits: u8, fractional_bits: u8) -> Self {
        assert!(
            integer_bits as u16 + fractional_bits as u16 > 0,
            "fixed-point formats need at least one bit"
        );
        assert!(integer_bits as u16 + fractional_bits as u16 <= 32);
        Self { integer_bits, fractional_bits, signed: false }
    }

    pub const fn total_bits(&self) -> u8 {
        self.integer_bits + self.fractional_bits
    }

    pub const fn fractional_bits(&self) -> u8 {
        self.fractional_bits
    }

    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    fn scale(&self) -> f64 {
        (1u64 << self.fractional_bits) as f64
    }

    /// Inclusive range of raw integers the format can store
    pub fn raw_bounds(&self) -> (i64, i64) {
        let bits = self.total_bits() as u32;
        if self.signed {
            (-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1)
        } else {
            (0, (1i64 << bits) - 1)
        }
    }

    pub fn raw_to_real(&self, raw: i64) -> f64 {
        raw as f64 / self.scale()
    }

    /// Scales `value` by `2^F`, rounding to the nearest representable step.
    pub fn real_to_raw(&self, value: f64) -> Result<i64, CtsDataError> {
        let (min, max) = self.raw_bounds();
        let scaled = (value * self.scale()).round();
        if !scaled.is_finite() || scaled < min as f64 || scaled > max as f64 {
            return Err(CtsDataError::range(&self.to_string(), value, self.total_bits()));
        }
        Ok(scaled as i64)
    }

    /// Reads a fixed-point value stored at `range` inside `word`.
    pub fn extract(&self, range: BitRange, word: u32) -> f64 {
        if self.signed {
            self.raw_to_real(range.extract_signed(word) as i64)
        } else {
            self.raw_to_real(range.extract_unsigned(word) as i64)
        }
    }

    /// Writes `value` into `range` of `word`, leaving the other bits as they were.
    pub fn insert(&self, range: BitRange, word: u32, value: f64) -> Result<u32, CtsDataError> {
        let raw = self.real_to_raw(value)?;
        if self.signed {
            range.insert_signed(word, raw as i32)
        } else {
            range.insert_unsigned(word, raw as u32)
        }
    }
}

impl std::fmt::Display for FixedPointFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.signed { "signed" } else { "unsigned" };
        write!(f, "{} <{},{}>", sign, self.integer_bits, self.fractional_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q8_8_extremes() {
        let q = FixedPointFormat::Q8_8;
        assert_eq!(q.raw_to_real(i16::MAX as i64), 127.99609375);
        assert_eq!(q.raw_to_real(i16::MIN as i64), -128.0);
        assert_eq!(q.real_to_raw(-128.0).unwrap(), i16::MIN as i64);
    }

    #[test]
    fn test_unsigned_rejects_negative() {
        let centre = FixedPointFormat::unsigned(7, 3);
        assert_eq!(centre.total_bits(), 10);
        assert!(centre.real_to_raw(-0.125).is_err());
        assert_eq!(centre.real_to_raw(127.875).unwrap(), 1023);
        assert!(centre.real_to_raw(128.0).is_err());
    }

    #[test]
    #[should_panic(expected = "at least one bit")]
    fn test_zero_width_signed_format_is_rejected() {
        FixedPointFormat::signed(0, 0);
    }

    #[test]
    #[should_panic(expected = "at least one bit")]
    fn test_zero_width_unsigned_format_is_rejected() {
        FixedPointFormat::unsigned(0, 0);
    }

    #[test]
    fn test_single_bit_formats_have_bounds() {
        assert_eq!(FixedPointFormat::signed(1, 0).raw_bounds(), (-1, 0));
        assert_eq!(FixedPointFormat::unsigned(0, 1).raw_bounds(), (0, 1));
        assert_eq!(FixedPointFormat::unsigned(0, 1).real_to_raw(0.5).unwrap(), 1);
    }

    #[test]
    fn test_non_finite_is_rejected() {
        assert!(FixedPointFormat::Q8_8.real_to_raw(f64::NAN).is_err());
        assert!(FixedPointFormat::Q8_8.real_to_raw(f64::INFINITY).is_err());
    }

    #[test]
    fn test_insert_into_upper_half() {
        let upper = BitRange::new(16, 16);
        let word = FixedPointFormat::Q8_8.insert(upper, 0x0000_1234, -2.5).unwrap();
        assert_eq!(word & 0xFFFF, 0x1234);
        assert_eq!(FixedPointFormat::Q8_8.extract(upper, word), -2.5);
    }
}
