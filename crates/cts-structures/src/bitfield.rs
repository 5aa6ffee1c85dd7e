//! Shift-and-mask access to sub-ranges of a 32-bit container word.
//!
//! Bit 0 is the least significant bit of the little-endian word, matching the packing order the
//! sensor firmware uses for its register map. Host bitfield features are never relied upon.

use crate::CtsDataError;

/// Width of every container word handled here
pub const CONTAINER_BITS: u8 = 32;

/// A `(bit_offset, bit_width)` pair locating a field inside a 32-bit word.
///
/// # Example
/// ```
/// use cts_structures::BitRange;
///
/// let frames_to_avg = BitRange::new(8, 3);
/// let word = frames_to_avg.insert_unsigned(0, 3).unwrap();
/// assert_eq!(word, 0x0000_0300);
/// assert_eq!(frames_to_avg.extract_unsigned(word), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitRange {
    offset: u8,
    width: u8,
}

impl BitRange {
    /// Panics (at compile time when used in a const table) if the range leaves the container.
    pub const fn new(offset: u8, width: u8) -> Self {
        assert!(width > 0, "bit ranges must be at least one bit wide");
        assert!(
            offset as u16 + width as u16 <= CONTAINER_BITS as u16,
            "bit range exceeds the 32 bit container"
        );
        Self { offset, width }
    }

    pub const fn offset(&self) -> u8 {
        self.offset
    }

    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Mask of the field's bits before shifting into position
    pub const fn value_mask(&self) -> u32 {
        if self.width >= CONTAINER_BITS {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        }
    }

    /// Mask of the field's bits in position within the container
    pub const fn word_mask(&self) -> u32 {
        self.value_mask() << self.offset
    }

    pub fn overlaps(&self, other: &BitRange) -> bool {
        self.word_mask() & other.word_mask() != 0
    }

    pub fn extract_unsigned(&self, word: u32) -> u32 {
        (word >> self.offset) & self.value_mask()
    }

    /// Extracts the field and sign extends it from its own width.
    pub fn extract_signed(&self, word: u32) -> i32 {
        let shift = CONTAINER_BITS - self.width;
        ((self.extract_unsigned(word) << shift) as i32) >> shift
    }

    /// Returns `word` with this field replaced by `value`; all other bits are untouched.
    pub fn insert_unsigned(&self, word: u32, value: u32) -> Result<u32, CtsDataError> {
        if value & !self.value_mask() != 0 {
            return Err(CtsDataError::range(&self.describe(), value, self.width));
        }
        Ok((word & !self.word_mask()) | (value << self.offset))
    }

    /// Two's complement counterpart of [`BitRange::insert_unsigned`].
    pub fn insert_signed(&self, word: u32, value: i32) -> Result<u32, CtsDataError> {
        let (min, max) = self.signed_bounds();
        if (value as i64) < min || (value as i64) > max {
            return Err(CtsDataError::range(&self.describe(), value, self.width));
        }
        Ok((word & !self.word_mask()) | (((value as u32) & self.value_mask()) << self.offset))
    }

    /// Inclusive range representable by a signed field of this width
    pub fn signed_bounds(&self) -> (i64, i64) {
        let half = 1i64 << (self.width - 1);
        (-half, half - 1)
    }

    fn describe(&self) -> String {
        format!("bits {}..{}", self.offset, self.offset + self.width)
    }
}
