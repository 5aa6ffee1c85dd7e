//! CRC-16/CCITT-FALSE: polynomial 0x1021, initial value 0xFFFF, no reflection, no final XOR.

use ::crc::{Crc, CRC_16_IBM_3740};

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Computes the checksum of `bytes`. Any input, including an empty slice, is valid.
///
/// # Example
/// ```
/// use cts_serialization::crc;
///
/// assert_eq!(crc::compute(b"123456789"), 0x29B1);
/// assert_eq!(crc::compute(&[]), 0xFFFF);
/// ```
pub fn compute(bytes: &[u8]) -> u16 {
    CRC16.checksum(bytes)
}

/// True when `stored_checksum` matches the checksum of `payload`.
pub fn verify(payload: &[u8], stored_checksum: u16) -> bool {
    compute(payload) == stored_checksum
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Bitwise reference straight from the polynomial definition
    fn compute_bitwise(bytes: &[u8]) -> u16 {
        const POLYNOMIAL: u16 = 0x1021;
        let mut crc = 0xFFFFu16;
        for byte in bytes {
            crc ^= (*byte as u16) << 8;
            for _ in 0..8 {
                crc = if crc & 0x8000 != 0 { (crc << 1) ^ POLYNOMIAL } else { crc << 1 };
            }
        }
        crc
    }

    #[test]
    fn test_reference_vectors() {
        assert_eq!(compute(b"123456789"), 0x29B1);
        assert_eq!(compute(&[]), 0xFFFF);
        assert_eq!(compute(&[0u8; 600]), 0xABF1);
        assert_eq!(compute(&[0u8; 256]), 0x41E8);
        assert_eq!(compute(&[0u8; 420]), 0xB178);
    }

    #[test]
    fn test_matches_bitwise_reference() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        assert_eq!(compute(&bytes), compute_bitwise(&bytes));
    }

    proptest! {
        #[test]
        fn verify_accepts_own_checksum(bytes in proptest::collection::vec(any::<u8>(), 0..700)) {
            prop_assert!(verify(&bytes, compute(&bytes)));
            prop_assert_eq!(compute(&bytes), compute_bitwise(&bytes));
        }
    }
}
