//! Signature scheme verifiers.

use cacao_core::{SCHEME_EIP191, SCHEME_SOLANA_ED25519};
use cacao_crypto::{ethereum, solana};
use tracing::trace;

/// Verifies signatures of one scheme.
///
/// Implementations must not panic; malformed addresses or signatures are
/// simply reported as not verified.
pub trait SchemeVerifier: Send + Sync {
    /// The scheme tag this verifier handles, e.g. `eip191`.
    fn scheme(&self) -> &str;

    /// Whether `signature` over `message` was produced by `address`.
    fn verify(&self, address: &str, message: &[u8], signature: &str) -> bool;
}

/// EIP-191 `personal_sign` signatures from Ethereum accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eip191Verifier;

impl SchemeVerifier for Eip191Verifier {
    fn scheme(&self) -> &str {
        SCHEME_EIP191
    }

    fn verify(&self, address: &str, message: &[u8], signature: &str) -> bool {
        match ethereum::verify(address, message, signature) {
            Ok(()) => true,
            Err(e) => {
                trace!(error = %e, "eip191 signature rejected");
                false
            },
        }
    }
}

/// Ed25519 signatures from Solana accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolanaEd25519Verifier;

impl SchemeVerifier for SolanaEd25519Verifier {
    fn scheme(&self) -> &str {
        SCHEME_SOLANA_ED25519
    }

    fn verify(&self, address: &str, message: &[u8], signature: &str) -> bool {
        match solana::verify(address, message, signature) {
            Ok(()) => true,
            Err(e) => {
                trace!(error = %e, "solana:ed25519 signature rejected");
                false
            },
        }
    }
}
