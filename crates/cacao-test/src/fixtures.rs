//! Test fixtures for keys, requests and signed capabilities.
//!
//! Fixture keys are fixed so addresses and signatures are reproducible
//! across runs. Helpers that cannot fail for fixture inputs panic instead
//! of returning `Result`.

use cacao_core::Cacao;
use cacao_crypto::{EthereumWallet, SolanaKeyPair};
use cacao_siwx::{CapabilityFactory, MessageFormatter, SiwxMessage, SiwxResult};
use chrono::{DateTime, Utc};

/// Well-known secp256k1 test key (from the web3 documentation).
pub const WEB3_SECRET: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

/// EIP-55 address of [`WEB3_SECRET`].
pub const WEB3_ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";

/// Issuance time used by the canonical requests.
pub const ISSUED_AT: &str = "2021-09-30T16:25:24.000Z";

/// Nonce used by the canonical requests.
pub const NONCE: &str = "32891757";

/// Solana devnet-style chain reference used by [`test_siws_request`].
pub const SOLANA_REFERENCE: &str = "4sGjMW1sUnHzSxGspuhpqLDx6wiyjNtZ";

/// The Ethereum wallet for [`WEB3_SECRET`].
///
/// # Panics
///
/// Never, for the fixed key.
#[must_use]
pub fn test_ethereum_wallet() -> EthereumWallet {
    EthereumWallet::from_hex(WEB3_SECRET).expect("fixture key is a valid scalar")
}

/// A Solana key pair derived from a fixed seed.
///
/// # Panics
///
/// Never, for the fixed seed.
#[must_use]
pub fn test_solana_keypair() -> SolanaKeyPair {
    SolanaKeyPair::from_secret_key(&[7u8; 32]).expect("fixture seed is 32 bytes")
}

/// [`ISSUED_AT`] as a `DateTime`.
///
/// # Panics
///
/// Never, for the fixed timestamp.
#[must_use]
pub fn test_issued_at() -> DateTime<Utc> {
    cacao_core::parse_timestamp(ISSUED_AT).expect("fixture timestamp is RFC 3339")
}

/// The canonical `service.org` Ethereum sign-in request for `address`.
///
/// Nonce and issuance time are fixed so the rendered text is stable.
#[must_use]
pub fn test_siwe_request(address: &str) -> SiwxMessage {
    SiwxMessage::new("service.org", address, "https://service.org/login", "1", "1")
        .with_statement("I accept the ServiceOrg Terms of Service: https://service.org/tos")
        .with_nonce(NONCE)
        .with_issued_at(ISSUED_AT)
        .with_resources([
            "ipfs://bafybeiemxf5abjwjbikoz4mc3a3dla6ual3jsgpdr4cjr3oz3evfyavhwq/",
            "https://example.com/my-web2-claim.json",
        ])
}

/// The canonical `service.org` Solana sign-in request for `address`.
#[must_use]
pub fn test_siws_request(address: &str) -> SiwxMessage {
    SiwxMessage::new(
        "service.org",
        address,
        "https://service.org/login",
        "1",
        SOLANA_REFERENCE,
    )
    .with_statement("I accept the ServiceOrg Terms of Service: https://service.org/tos")
    .with_nonce(NONCE)
    .with_issued_at(ISSUED_AT)
}

/// Render `request` with `formatter`, sign the text and package the result.
///
/// # Errors
///
/// Returns any rendering or packaging error from the formatter.
pub fn signed_cacao<F>(
    formatter: &MessageFormatter,
    request: &SiwxMessage,
    sign: F,
) -> SiwxResult<Cacao>
where
    F: FnOnce(&[u8]) -> String,
{
    let rendered = formatter.render(request)?;
    let signature = sign(rendered.as_bytes());
    formatter.from_chain_message(&rendered.message.with_signature(signature))
}

/// A capability for `request` signed by `wallet` through the `eip155` formatter.
///
/// # Panics
///
/// Panics if the request cannot be rendered or the wallet fails to sign.
#[must_use]
pub fn signed_ethereum_cacao(wallet: &EthereumWallet, request: &SiwxMessage) -> Cacao {
    signed_cacao(&MessageFormatter::ethereum(), request, |bytes| {
        wallet.sign_message(bytes).expect("secp256k1 signing succeeds")
    })
    .expect("fixture request renders")
}

/// A capability for `request` signed by `keypair` through the `solana` formatter.
///
/// # Panics
///
/// Panics if the request cannot be rendered.
#[must_use]
pub fn signed_solana_cacao(keypair: &SolanaKeyPair, request: &SiwxMessage) -> Cacao {
    signed_cacao(&MessageFormatter::solana(), request, |bytes| {
        keypair.sign(bytes)
    })
    .expect("fixture request renders")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_wallet_address() {
        assert_eq!(test_ethereum_wallet().address(), WEB3_ADDRESS);
    }

    #[test]
    fn test_fixture_solana_keypair_is_stable() {
        assert_eq!(test_solana_keypair().address(), test_solana_keypair().address());
    }

    #[test]
    fn test_signed_ethereum_cacao() {
        let wallet = test_ethereum_wallet();
        let cacao = signed_ethereum_cacao(&wallet, &test_siwe_request(&wallet.address()));

        assert!(cacao.is_signed());
        assert_eq!(
            cacao.issuer(),
            format!("did:pkh:eip155:1:{WEB3_ADDRESS}")
        );
        assert_eq!(cacao.payload().issued_at, ISSUED_AT);
    }

    #[test]
    fn test_signed_solana_cacao() {
        let keypair = test_solana_keypair();
        let cacao = signed_solana_cacao(&keypair, &test_siws_request(&keypair.address()));

        assert_eq!(cacao.header().format(), "caip122");
        assert!(cacao.issuer().starts_with("did:pkh:solana:"));
    }
}
