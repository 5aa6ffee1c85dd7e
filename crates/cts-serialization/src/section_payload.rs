use cts_structures::CtsDataError;

/// A typed value carried in the payload of a frame section.
///
/// Implementations read and write exactly [`SectionPayload::PAYLOAD_BYTE_COUNT`] bytes, little
/// endian with no padding. The trailing checksum is handled by the section codec, never here.
pub trait SectionPayload: Sized {
    /// Number of payload bytes, excluding the checksum
    const PAYLOAD_BYTE_COUNT: usize;

    /// Name used in size mismatch errors
    const PAYLOAD_NAME: &'static str;

    /// Serializes into a slice of exactly `PAYLOAD_BYTE_COUNT` bytes
    fn try_write_to_payload(&self, byte_destination: &mut [u8]) -> Result<(), CtsDataError>;

    /// Deserializes from a slice of exactly `PAYLOAD_BYTE_COUNT` bytes
    fn try_read_from_payload(byte_source: &[u8]) -> Result<Self, CtsDataError>;

    /// Verifies that a slice has the length this payload requires
    fn verify_payload_length(byte_slice: &[u8]) -> Result<(), CtsDataError> {
        if byte_slice.len() != Self::PAYLOAD_BYTE_COUNT {
            return Err(CtsDataError::size_mismatch(
                Self::PAYLOAD_NAME,
                Self::PAYLOAD_BYTE_COUNT,
                byte_slice.len(),
            ));
        }
        Ok(())
    }
}
