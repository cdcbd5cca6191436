//! Verification error types.

use thiserror::Error;

/// Why a capability was rejected. Each rejection has exactly one reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The capability carries no signature.
    #[error("capability is not signed")]
    MissingSignature,

    /// The capability is not valid yet at the verification time.
    #[error("capability not valid before {valid_from} ({field})")]
    NotYetValid {
        /// Payload field that holds the start time (`iat` or `nbf`).
        field: &'static str,
        /// The start time.
        valid_from: String,
    },

    /// The capability expired before the verification time.
    #[error("capability expired at {expired_at}")]
    Expired {
        /// The expiration time.
        expired_at: String,
    },

    /// A payload timestamp is not RFC 3339.
    #[error("malformed timestamp in '{field}': {value}")]
    MalformedTimestamp {
        /// Payload field (`iat`, `nbf` or `exp`).
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// The issuer is not a well-formed `did:pkh` identifier.
    #[error("unsupported issuer format '{issuer}': {reason}")]
    UnsupportedIssuerFormat {
        /// The offending issuer.
        issuer: String,
        /// What part of the grammar it violates.
        reason: String,
    },

    /// No message formatter is registered for the issuer's namespace.
    #[error("unsupported namespace: {namespace}")]
    UnsupportedNamespace {
        /// The issuer's namespace.
        namespace: String,
    },

    /// The header does not match the namespace's message format.
    #[error("unsupported header: expected '{expected}', got '{actual}'")]
    UnsupportedHeader {
        /// Header type of the namespace.
        expected: String,
        /// Header type of the capability.
        actual: String,
    },

    /// The payload cannot be rendered as a canonical sign-in message.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// No verifier is registered for the signature scheme.
    #[error("unsupported signature scheme: {scheme}")]
    UnsupportedScheme {
        /// The signature's scheme tag.
        scheme: String,
    },

    /// The signature does not verify for the issuer over the signed text.
    #[error("invalid signature")]
    InvalidSignature,
}

/// Result type for verification.
pub type VerifyResult<T> = Result<T, VerificationError>;
