//! End-to-end: render, sign with a wallet, package, verify.

#![allow(clippy::arithmetic_side_effects)]

use std::sync::Arc;

use cacao_core::{Cacao, Signature};
use cacao_crypto::{EthereumWallet, SolanaKeyPair};
use cacao_siwx::{CapabilityFactory, FormatterRegistry, MessageFormatter, SiwxMessage};
use cacao_test::{
    MockSchemeVerifier, WEB3_ADDRESS, init_test_logging, signed_cacao, signed_ethereum_cacao,
    signed_solana_cacao, test_ethereum_wallet, test_issued_at, test_siwe_request,
    test_siws_request, test_solana_keypair,
};
use cacao_verify::{SchemeRegistry, VerificationEngine, VerificationError, VerifyOptions, verify};

fn at_issuance() -> VerifyOptions {
    VerifyOptions::new().at(test_issued_at())
}

#[test]
fn test_ethereum_capability_verifies() {
    init_test_logging();
    let wallet = test_ethereum_wallet();
    let cacao = signed_ethereum_cacao(&wallet, &test_siwe_request(&wallet.address()));

    assert_eq!(cacao.issuer(), format!("did:pkh:eip155:1:{WEB3_ADDRESS}"));
    assert_eq!(verify(&cacao, &at_issuance()), Ok(()));
}

#[test]
fn test_ethereum_lowercase_address_verifies() {
    let wallet = test_ethereum_wallet();
    let request = test_siwe_request(&wallet.address().to_lowercase());
    let cacao = signed_ethereum_cacao(&wallet, &request);

    assert_eq!(verify(&cacao, &at_issuance()), Ok(()));
}

#[test]
fn test_solana_capability_verifies() {
    let keypair = test_solana_keypair();
    let cacao = signed_solana_cacao(&keypair, &test_siws_request(&keypair.address()));

    assert_eq!(cacao.header().format(), "caip122");
    assert_eq!(cacao.signature().unwrap().scheme, "solana:ed25519");
    assert_eq!(verify(&cacao, &at_issuance()), Ok(()));
}

#[test]
fn test_signature_from_other_wallet_rejected() {
    let wallet = test_ethereum_wallet();
    let impostor = EthereumWallet::generate();
    let request = test_siwe_request(&wallet.address());

    let cacao = signed_ethereum_cacao(&impostor, &request);
    assert_eq!(
        verify(&cacao, &at_issuance()),
        Err(VerificationError::InvalidSignature)
    );
}

#[test]
fn test_every_payload_field_is_covered_by_signature() {
    let wallet = test_ethereum_wallet();
    let original = signed_ethereum_cacao(
        &wallet,
        &test_siwe_request(&wallet.address())
            .with_request_id("req-1")
            .with_expiration_time("2021-10-30T16:25:24.000Z"),
    );

    let tampers: [fn(&mut Cacao); 9] = [
        |c| c.p.domain = "evil.org".to_string(),
        |c| c.p.audience = "https://evil.org/login".to_string(),
        |c| c.p.version = "2".to_string(),
        |c| c.p.nonce = "99999999".to_string(),
        |c| c.p.statement = Some("I accept nothing".to_string()),
        |c| c.p.statement = None,
        |c| c.p.request_id = Some("req-2".to_string()),
        |c| c.p.expiration_time = Some("2031-10-30T16:25:24.000Z".to_string()),
        |c| {
            if let Some(resources) = c.p.resources.as_mut() {
                resources.reverse();
            }
        },
    ];

    for (i, tamper) in tampers.into_iter().enumerate() {
        let mut cacao = original.clone();
        tamper(&mut cacao);
        assert_eq!(
            verify(&cacao, &at_issuance()),
            Err(VerificationError::InvalidSignature),
            "tamper #{i} went unnoticed"
        );
    }
}

#[test]
fn test_solana_signature_with_ethereum_scheme_rejected() {
    let keypair = test_solana_keypair();
    let mut cacao = signed_solana_cacao(&keypair, &test_siws_request(&keypair.address()));
    let value = cacao.signature().unwrap().value.clone();
    cacao.s = Some(Signature::new("eip191", value));

    assert_eq!(
        verify(&cacao, &at_issuance()),
        Err(VerificationError::InvalidSignature)
    );
}

#[test]
fn test_unsigned_capability_rejected_first() {
    let formatter = MessageFormatter::ethereum();
    let rendered = formatter.render(&test_siwe_request(WEB3_ADDRESS)).unwrap();
    let cacao = formatter.from_chain_message(&rendered.message).unwrap();

    assert!(!cacao.is_signed());
    // Even far in the future, the missing signature is reported.
    let options = VerifyOptions::new().at(chrono::DateTime::<chrono::Utc>::MAX_UTC);
    assert_eq!(
        verify(&cacao, &options),
        Err(VerificationError::MissingSignature)
    );
}

#[test]
fn test_custom_scheme_through_mock_verifier() {
    let wallet = test_ethereum_wallet();
    let mut cacao = signed_ethereum_cacao(&wallet, &test_siwe_request(&wallet.address()));
    cacao.s = Some(Signature::new("eip1271", "0xcontract-signature"));

    let global = verify(&cacao, &at_issuance());
    assert_eq!(
        global,
        Err(VerificationError::UnsupportedScheme {
            scheme: "eip1271".to_string()
        })
    );

    let mock = MockSchemeVerifier::accepting("eip1271");
    let mut schemes = SchemeRegistry::with_defaults();
    schemes.register(Arc::new(mock.clone()));
    let engine = VerificationEngine::new(FormatterRegistry::with_defaults(), schemes);

    assert_eq!(engine.verify(&cacao, &at_issuance()), Ok(()));

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].address, WEB3_ADDRESS);
    assert_eq!(calls[0].signature, "0xcontract-signature");
    assert_eq!(calls[0].message, engine.signed_message(&cacao).unwrap());
}

#[test]
fn test_verifier_not_consulted_for_expired_capability() {
    let wallet = test_ethereum_wallet();
    let cacao = signed_ethereum_cacao(
        &wallet,
        &test_siwe_request(&wallet.address()).with_expiration_time("2021-09-30T16:30:24.000Z"),
    );

    let mock = MockSchemeVerifier::accepting("eip191");
    let mut schemes = SchemeRegistry::new();
    schemes.register(Arc::new(mock.clone()));
    let engine = VerificationEngine::new(FormatterRegistry::with_defaults(), schemes);

    let late = VerifyOptions::new()
        .at(test_issued_at() + chrono::TimeDelta::days(1))
        .with_clock_skew_secs(0);
    assert!(matches!(
        engine.verify(&cacao, &late),
        Err(VerificationError::Expired { .. })
    ));
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn test_new_namespace_is_pluggable() {
    // A chain the built-in registry knows nothing about, signing with Ed25519.
    let formatter = MessageFormatter::new("tezos", "Tezos", "caip122", "tezos:ed25519");
    let keypair = SolanaKeyPair::generate();
    let request = SiwxMessage::new(
        "service.org",
        keypair.address(),
        "https://service.org/login",
        "1",
        "NetXdQprcVkpaWU",
    )
    .with_nonce("abcdefgh1234")
    .with_issued_at("2021-09-30T16:25:24.000Z");

    let cacao = signed_cacao(&formatter, &request, |bytes| keypair.sign(bytes)).unwrap();
    assert_eq!(
        verify(&cacao, &at_issuance()),
        Err(VerificationError::UnsupportedNamespace {
            namespace: "tezos".to_string()
        })
    );

    let mut formatters = FormatterRegistry::with_defaults();
    formatters.register(formatter);
    let mock = MockSchemeVerifier::accepting("tezos:ed25519");
    let mut schemes = SchemeRegistry::with_defaults();
    schemes.register(Arc::new(mock.clone()));
    let engine = VerificationEngine::new(formatters, schemes);

    assert_eq!(engine.verify(&cacao, &at_issuance()), Ok(()));
    assert!(
        mock.calls()[0]
            .message
            .starts_with("service.org wants you to sign in with your Tezos account:")
    );
}
