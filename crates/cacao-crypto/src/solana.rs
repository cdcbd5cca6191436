//! Ed25519 key pairs for Solana-style accounts.
//!
//! A Solana account address is the base58 encoding of the 32-byte Ed25519
//! public key. Wallets sign the raw UTF-8 bytes of the sign-in message and
//! the 64-byte signature travels as base58 text.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, CryptoResult};

const PUBLIC_KEY_LEN: usize = 32;
const SECRET_KEY_LEN: usize = 32;
const SIGNATURE_LEN: usize = 64;

/// A Solana account key; the secret half is wiped on drop.
#[derive(ZeroizeOnDrop)]
pub struct SolanaKeyPair {
    #[zeroize(skip)]
    verifying_key: VerifyingKey,
    signing_key: SigningKey,
}

impl SolanaKeyPair {
    /// A fresh random account.
    #[must_use]
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        let verifying_key = signing_key.verifying_key();
        Self {
            verifying_key,
            signing_key,
        }
    }

    /// Rebuild an account from its 32-byte Ed25519 seed.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] for any other length.
    pub fn from_secret_key(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != SECRET_KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: SECRET_KEY_LEN,
                actual: bytes.len(),
            });
        }

        let mut seed = [0u8; SECRET_KEY_LEN];
        seed.copy_from_slice(bytes);
        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();

        let verifying_key = signing_key.verifying_key();
        Ok(Self {
            verifying_key,
            signing_key,
        })
    }

    /// Raw public key; the address is its base58 form.
    #[must_use]
    pub fn public_key_bytes(&self) -> &[u8; 32] {
        self.verifying_key.as_bytes()
    }

    /// The account address (base58 public key).
    #[must_use]
    pub fn address(&self) -> String {
        bs58::encode(self.public_key_bytes()).into_string()
    }

    /// Sign the raw message bytes; the signature is base58 text.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> String {
        let sig = self.signing_key.sign(message);
        bs58::encode(sig.to_bytes()).into_string()
    }

    /// Check a signature against this account.
    ///
    /// # Errors
    ///
    /// Same as the free [`verify`].
    pub fn verify(&self, message: &[u8], signature: &str) -> CryptoResult<()> {
        verify(&self.address(), message, signature)
    }
}

impl std::fmt::Debug for SolanaKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolanaKeyPair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Decode a base58 account address into raw public key bytes.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidBase58Encoding`] for bad base58 and
/// [`CryptoError::InvalidKeyLength`] when the decoded key is not 32 bytes.
pub fn decode_address(address: &str) -> CryptoResult<[u8; 32]> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|_| CryptoError::InvalidBase58Encoding)?;
    <[u8; PUBLIC_KEY_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
        CryptoError::InvalidKeyLength {
            expected: PUBLIC_KEY_LEN,
            actual: bytes.len(),
        }
    })
}

/// Verify a base58 Ed25519 signature over `message` for a base58 address.
///
/// # Errors
///
/// Returns an error if the address or signature cannot be decoded, or if the
/// signature does not verify.
pub fn verify(address: &str, message: &[u8], signature: &str) -> CryptoResult<()> {
    let public_key = decode_address(address)?;
    let verifying_key = VerifyingKey::from_bytes(&public_key)
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;

    let sig_bytes = bs58::decode(signature)
        .into_vec()
        .map_err(|_| CryptoError::InvalidBase58Encoding)?;
    let sig_bytes = <[u8; SIGNATURE_LEN]>::try_from(sig_bytes.as_slice()).map_err(|_| {
        CryptoError::InvalidSignatureLength {
            expected: SIGNATURE_LEN,
            actual: sig_bytes.len(),
        }
    })?;
    let sig = DalekSignature::from_bytes(&sig_bytes);

    verifying_key
        .verify(message, &sig)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_accounts_differ() {
        assert_ne!(
            SolanaKeyPair::generate().address(),
            SolanaKeyPair::generate().address()
        );
    }

    #[test]
    fn test_seed_is_deterministic() {
        let first = SolanaKeyPair::from_secret_key(&[7u8; 32]).unwrap();
        let second = SolanaKeyPair::from_secret_key(&[7u8; 32]).unwrap();

        assert_eq!(first.address(), second.address());
        assert_eq!(decode_address(&first.address()).unwrap(), *first.public_key_bytes());
    }

    #[test]
    fn test_signature_binds_message() {
        let account = SolanaKeyPair::generate();
        let message = b"service.org wants you to sign in with your Solana account:";

        let signature = account.sign(message);
        assert!(account.verify(message, &signature).is_ok());
        assert!(verify(&account.address(), message, &signature).is_ok());
        assert!(matches!(
            account.verify(b"service.org", &signature),
            Err(CryptoError::SignatureVerificationFailed)
        ));
    }

    #[test]
    fn test_verify_wrong_address() {
        let signer = SolanaKeyPair::generate();
        let other = SolanaKeyPair::generate();
        let signature = signer.sign(b"msg");

        assert!(verify(&other.address(), b"msg", &signature).is_err());
    }

    #[test]
    fn test_malformed_inputs() {
        let keypair = SolanaKeyPair::generate();

        assert!(matches!(
            verify("0OIl", b"msg", &keypair.sign(b"msg")),
            Err(CryptoError::InvalidBase58Encoding)
        ));
        assert!(matches!(
            verify(&keypair.address(), b"msg", "abc"),
            Err(CryptoError::InvalidSignatureLength { .. })
        ));
        assert!(matches!(
            decode_address("2"),
            Err(CryptoError::InvalidKeyLength { .. })
        ));
    }

    #[test]
    fn test_invalid_key_length() {
        let result = SolanaKeyPair::from_secret_key(&[0u8; 31]);
        assert!(matches!(result, Err(CryptoError::InvalidKeyLength { .. })));
    }

    #[test]
    fn test_debug_hides_secret() {
        let keypair = SolanaKeyPair::from_secret_key(&[9u8; 32]).unwrap();
        let debug = format!("{keypair:?}");
        assert!(debug.contains(&keypair.address()));
        assert!(!debug.contains("signing_key"));
    }
}
