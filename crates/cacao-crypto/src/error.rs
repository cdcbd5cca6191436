//! Signature and key errors.

use thiserror::Error;

/// Why a key could not be built or a signature did not check out.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key bytes of the wrong size.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// Signature bytes of the wrong size.
    #[error("invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength {
        /// Required size.
        expected: usize,
        /// Size received.
        actual: usize,
    },

    /// A secp256k1 scalar of zero or beyond the group order.
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    /// Bytes that are not a point on the curve.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// `v` byte other than 0, 1, 27 or 28.
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// No public key is consistent with the signature.
    #[error("cannot recover a public key from the signature")]
    RecoveryFailed,

    /// The signer refused the digest.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// Well-formed signature from a different key or over a different message.
    #[error("signature does not match")]
    SignatureVerificationFailed,

    /// Not hex, with or without `0x`.
    #[error("invalid hex encoding")]
    InvalidHexEncoding,

    /// Not base58 in the Bitcoin alphabet.
    #[error("invalid base58 encoding")]
    InvalidBase58Encoding,
}

/// Result alias for this crate.
pub type CryptoResult<T> = Result<T, CryptoError>;
