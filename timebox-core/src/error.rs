//! Error types for TimeBox-rs operations.
//!
//! Every failure in the workspace eventually surfaces as a [`TimeboxError`].
//! Image decoding errors are fatal to the parse that raised them; frame
//! reassembly errors are caller contract violations.

use std::io;
use thiserror::Error;

/// The main error type for TimeBox-rs operations.
#[derive(Debug, Error)]
pub enum TimeboxError {
    /// I/O error from an underlying reader, writer or transport.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Bad signature or logical screen descriptor.
    #[error("Malformed header: {message}")]
    MalformedHeader {
        /// Description of the header problem.
        message: String,
    },

    /// A feature of the container that is not supported.
    #[error("Unsupported feature: {feature}")]
    UnsupportedFeature {
        /// The feature that was encountered.
        feature: String,
    },

    /// The compressed stream or container structure violates the protocol.
    #[error("Decode protocol violation: {message}")]
    DecodeProtocolViolation {
        /// Description of the violation.
        message: String,
    },

    /// Attempted to read past the end of the available bytes.
    #[error("Truncated input at offset {offset}: needed {needed} more byte(s)")]
    TruncatedInput {
        /// Byte offset at which the read was attempted.
        offset: usize,
        /// Number of bytes that were missing.
        needed: usize,
    },

    /// Frame extraction was requested but no end sentinel is buffered.
    #[error("No frame available: no end sentinel in the input buffer")]
    NoFrameAvailable,

    /// An argument is outside its valid domain.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },
}

/// Result type alias for TimeBox-rs operations.
pub type Result<T> = std::result::Result<T, TimeboxError>;

impl TimeboxError {
    /// Create a malformed header error.
    pub fn malformed_header(message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            message: message.into(),
        }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            feature: feature.into(),
        }
    }

    /// Create a decode protocol violation error.
    pub fn protocol_violation(message: impl Into<String>) -> Self {
        Self::DecodeProtocolViolation {
            message: message.into(),
        }
    }

    /// Create a truncated input error.
    pub fn truncated(offset: usize, needed: usize) -> Self {
        Self::TruncatedInput { offset, needed }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Whether this error means the input simply ran out.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}
