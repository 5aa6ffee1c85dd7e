/// Common error type for CTS telemetry data operations.
///
/// Checksum mismatches are deliberately absent: a corrupted section is reported as data
/// (see `SectionOutcome` in `cts-serialization`) so that one bad section never aborts a frame.
///
/// # Examples
/// ```
/// use cts_structures::CtsDataError;
///
/// fn verify_length(bytes: &[u8]) -> Result<(), CtsDataError> {
///     if bytes.len() != 4 {
///         return Err(CtsDataError::SizeMismatch {
///             context: "register word".into(),
///             expected: 4,
///             actual: bytes.len(),
///         });
///     }
///     Ok(())
/// }
///
/// assert!(verify_length(&[0u8; 3]).is_err());
/// assert!(verify_length(&[0u8; 4]).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CtsDataError {
    /// A buffer or section did not have the length its schema requires
    #[error("Size mismatch for {context}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },
    /// A value does not fit the bit width declared for its field
    #[error("Value {value} does not fit in the {width} bit field '{field}'")]
    RangeError {
        field: String,
        value: String,
        width: u8,
    },
    /// Invalid parameters provided to a function
    #[error("Bad Parameters: {0}")]
    BadParameters(String),
}

impl CtsDataError {
    pub(crate) fn range(field: &str, value: impl std::fmt::Display, width: u8) -> Self {
        CtsDataError::RangeError {
            field: field.to_string(),
            value: value.to_string(),
            width,
        }
    }

    pub fn size_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        CtsDataError::SizeMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}
