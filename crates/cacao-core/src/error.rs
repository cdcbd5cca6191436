//! Core error types.

use thiserror::Error;

/// Errors raised while interpreting capability data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The issuer is not a well-formed `did:pkh` identifier.
    #[error("unsupported issuer format '{issuer}': {reason}")]
    UnsupportedIssuerFormat {
        /// The offending issuer string.
        issuer: String,
        /// What part of the grammar it violates.
        reason: String,
    },

    /// A timestamp field is not valid RFC 3339.
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// The offending value.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by a [`BlockCodec`](crate::BlockCodec).
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value could not be encoded.
    #[error("encode failed: {0}")]
    Encode(String),

    /// The bytes could not be decoded into a capability.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The bytes decode, but are not the canonical encoding of their value.
    #[error("block bytes are not in canonical form")]
    NonCanonical,

    /// The block's content id differs from the expected one.
    #[error("content id mismatch: expected {expected}, got {actual}")]
    CidMismatch {
        /// The content id the caller expected.
        expected: String,
        /// The content id derived from the bytes.
        actual: String,
    },
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
