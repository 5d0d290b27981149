//! # Error Types
//!
//! Errors raised by the validating constructors of the core primitives.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.

use thiserror::Error;

/// Top-level error type for the core primitives.
#[derive(Error, Debug)]
pub enum EtlcError {
    /// The value is not a 64-character hexadecimal SHA-256 digest.
    #[error("invalid content fingerprint {value:?}: {reason}")]
    InvalidFingerprint {
        /// The rejected input.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The value is not an ISO-8601 datetime.
    #[error("invalid ISO 8601 datetime format: {value:?}")]
    InvalidDateTime {
        /// The rejected input.
        value: String,
    },

    /// An identifier that must be non-empty was empty.
    #[error("{field} must not be empty")]
    EmptyIdentifier {
        /// Name of the identifier kind.
        field: &'static str,
    },

    /// IO error while reading content to fingerprint.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
