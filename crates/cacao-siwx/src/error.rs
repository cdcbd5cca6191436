//! Error types for message formatting and capability packaging.

use thiserror::Error;

/// Errors raised while rendering, parsing or packaging sign-in messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiwxError {
    /// The text does not follow the canonical layout.
    #[error("malformed message at line {line}: {reason}")]
    MalformedMessage {
        /// First structurally invalid line (1-based).
        line: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A request field cannot be rendered without breaking the layout.
    #[error("invalid field '{field}': {reason}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A field required for packaging is absent.
    #[error("missing field '{field}'")]
    MissingField {
        /// Field name.
        field: &'static str,
    },

    /// The issuer is not a well-formed `did:pkh` identifier.
    #[error("unsupported issuer format '{issuer}': {reason}")]
    UnsupportedIssuerFormat {
        /// The offending issuer.
        issuer: String,
        /// What part of the grammar it violates.
        reason: String,
    },

    /// The capability header does not match the formatter.
    #[error("unsupported header: expected '{expected}', got '{actual}'")]
    UnsupportedHeader {
        /// Header type of the formatter.
        expected: String,
        /// Header type of the capability.
        actual: String,
    },

    /// No formatter is registered for the namespace.
    #[error("unsupported namespace: {namespace}")]
    UnsupportedNamespace {
        /// The requested namespace.
        namespace: String,
    },

    /// The issuer belongs to a different namespace than the formatter.
    #[error("namespace mismatch: expected '{expected}', got '{actual}'")]
    NamespaceMismatch {
        /// Namespace of the formatter.
        expected: String,
        /// Namespace of the issuer.
        actual: String,
    },
}

impl From<cacao_core::CoreError> for SiwxError {
    fn from(err: cacao_core::CoreError) -> Self {
        match err {
            cacao_core::CoreError::UnsupportedIssuerFormat { issuer, reason } => {
                Self::UnsupportedIssuerFormat { issuer, reason }
            },
            cacao_core::CoreError::InvalidTimestamp { value, reason } => Self::InvalidField {
                field: "timestamp",
                reason: format!("'{value}': {reason}"),
            },
        }
    }
}

/// Result type for sign-in message operations.
pub type SiwxResult<T> = Result<T, SiwxError>;
