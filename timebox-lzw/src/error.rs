//! LZW-specific error types.

use thiserror::Error;
use timebox_core::TimeboxError;

/// LZW compression/decompression errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// The stream did not open with the clear code.
    #[error("Expected clear code {expected}, found {found}")]
    MissingClearCode {
        /// The clear code for the active code size.
        expected: u16,
        /// The code actually read.
        found: u16,
    },

    /// A code that is neither in the table nor the next one to be assigned.
    #[error("Invalid LZW code: {code} (next assignable code is {next})")]
    InvalidCode {
        /// The offending code.
        code: u16,
        /// The key the table would assign next.
        next: u16,
    },

    /// Invalid minimum code size.
    #[error("Invalid minimum code size: {0} (must be 1-11)")]
    InvalidCodeSize(u8),

    /// Invalid color table size.
    #[error("Invalid color table size: {0}")]
    InvalidTableSize(u16),

    /// A color index that is not covered by the color table.
    #[error("Color index {index} outside color table of {table_size} entries")]
    IndexOutOfRange {
        /// The offending index.
        index: u8,
        /// Size of the active color table.
        table_size: u16,
    },

    /// Bit-level read or write failure.
    #[error(transparent)]
    Bitstream(#[from] TimeboxError),
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;

impl From<LzwError> for TimeboxError {
    fn from(err: LzwError) -> Self {
        match err {
            LzwError::Bitstream(inner) => inner,
            LzwError::InvalidCodeSize(_) | LzwError::InvalidTableSize(_) => {
                TimeboxError::invalid_argument(err.to_string())
            }
            other => TimeboxError::protocol_violation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_keeps_truncation() {
        let err = LzwError::Bitstream(TimeboxError::truncated(7, 1));
        let converted: TimeboxError = err.into();
        assert!(converted.is_truncation());
    }

    #[test]
    fn test_conversion_to_protocol_violation() {
        let err = LzwError::MissingClearCode {
            expected: 4,
            found: 1,
        };
        let converted: TimeboxError = err.into();
        assert!(matches!(
            converted,
            TimeboxError::DecodeProtocolViolation { .. }
        ));
        assert!(converted.to_string().contains("Expected clear code 4"));
    }
}
