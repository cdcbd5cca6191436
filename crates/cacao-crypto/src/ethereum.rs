//! EIP-191 `personal_sign` over secp256k1.
//!
//! Ethereum wallets sign `keccak256("\x19Ethereum Signed Message:\n" || len || message)`
//! with a recoverable ECDSA signature. The signature travels as `0x`-prefixed
//! hex of `r || s || v` (65 bytes) where `v` is `27`/`28` (or `0`/`1`).
//! Verification recovers the signer's public key and compares the derived
//! address with the claimed one, ignoring EIP-55 checksum casing.

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use sha3::{Digest, Keccak256};

use crate::error::{CryptoError, CryptoResult};

/// Prefix prepended to every message before hashing.
const EIP191_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Length of a recoverable signature (`r || s || v`).
const RECOVERABLE_SIGNATURE_LEN: usize = 65;

/// Length of a secp256k1 secret key in bytes.
const SECRET_KEY_LEN: usize = 32;

/// Offset added to the recovery id in the legacy `v` encoding.
const LEGACY_V_OFFSET: u8 = 27;

/// Hash a message the way `personal_sign` does.
#[must_use]
pub fn hash_message(message: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(EIP191_PREFIX);
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

/// Format a 20-byte address with the EIP-55 mixed-case checksum.
#[must_use]
pub fn to_checksum_address(address: &[u8]) -> String {
    let lower = hex::encode(address);
    let hash = Keccak256::digest(lower.as_bytes());
    let nibbles = hash.iter().flat_map(|b| [b >> 4, b & 0x0f]);

    let mut out = String::with_capacity(lower.len().saturating_add(2));
    out.push_str("0x");
    for (c, nibble) in lower.chars().zip(nibbles) {
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Derive the checksummed address of a public key.
fn address_of(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(false);
    // Skip the 0x04 SEC1 tag; the address is the last 20 bytes of the hash.
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    to_checksum_address(&hash[12..])
}

fn decode_hex(value: &str) -> CryptoResult<Vec<u8>> {
    let trimmed = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(trimmed).map_err(|_| CryptoError::InvalidHexEncoding)
}

/// Recover the address that produced an EIP-191 signature over `message`.
///
/// # Errors
///
/// Returns an error if the signature is not 65 bytes of hex, carries an
/// unknown `v` value, or no public key can be recovered from it.
pub fn recover_address(message: &[u8], signature: &str) -> CryptoResult<String> {
    let raw = decode_hex(signature)?;
    if raw.len() != RECOVERABLE_SIGNATURE_LEN {
        return Err(CryptoError::InvalidSignatureLength {
            expected: RECOVERABLE_SIGNATURE_LEN,
            actual: raw.len(),
        });
    }

    let (rs, v) = raw.split_at(64);
    let v = v.first().copied().unwrap_or_default();
    let recovery_byte = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        other => return Err(CryptoError::InvalidRecoveryId(other)),
    };
    let recovery_id =
        RecoveryId::from_byte(recovery_byte).ok_or(CryptoError::InvalidRecoveryId(v))?;
    let sig = EcdsaSignature::from_slice(rs).map_err(|_| CryptoError::SignatureVerificationFailed)?;

    let digest = hash_message(message);
    let key = VerifyingKey::recover_from_prehash(&digest, &sig, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;
    Ok(address_of(&key))
}

/// Verify that `signature` over `message` was produced by `address`.
///
/// # Errors
///
/// Returns [`CryptoError::SignatureVerificationFailed`] when the recovered
/// address differs, or any error from [`recover_address`].
pub fn verify(address: &str, message: &[u8], signature: &str) -> CryptoResult<()> {
    let recovered = recover_address(message, signature)?;
    if recovered.eq_ignore_ascii_case(address) {
        Ok(())
    } else {
        Err(CryptoError::SignatureVerificationFailed)
    }
}

/// A secp256k1 wallet that signs with `personal_sign` semantics.
///
/// `SigningKey` zeroizes its scalar on drop.
pub struct EthereumWallet {
    signing_key: SigningKey,
}

impl EthereumWallet {
    /// Generate a new random wallet.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// Create from a 32-byte secret key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] for a wrong-length slice and
    /// [`CryptoError::InvalidSecretKey`] for a scalar outside the curve order.
    pub fn from_secret_key(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != SECRET_KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: SECRET_KEY_LEN,
                actual: bytes.len(),
            });
        }
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|e| CryptoError::InvalidSecretKey(e.to_string()))?;
        Ok(Self { signing_key })
    }

    /// Create from a hex secret key (with or without `0x`).
    ///
    /// # Errors
    ///
    /// Returns an error if the hex is invalid or the key is not usable.
    pub fn from_hex(secret: &str) -> CryptoResult<Self> {
        let bytes = zeroize::Zeroizing::new(decode_hex(secret)?);
        Self::from_secret_key(&bytes)
    }

    /// The EIP-55 checksummed address of this wallet.
    #[must_use]
    pub fn address(&self) -> String {
        address_of(self.signing_key.verifying_key())
    }

    /// Sign a message, returning `0x`-prefixed hex `r || s || v`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::SigningFailed`] if the signer rejects the digest.
    pub fn sign_message(&self, message: &[u8]) -> CryptoResult<String> {
        let digest = hash_message(message);
        let (sig, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        let mut bytes = Vec::with_capacity(RECOVERABLE_SIGNATURE_LEN);
        bytes.extend_from_slice(&sig.to_bytes());
        bytes.push(recovery_id.to_byte().saturating_add(LEGACY_V_OFFSET));
        Ok(format!("0x{}", hex::encode(bytes)))
    }
}

impl std::fmt::Debug for EthereumWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthereumWallet")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
