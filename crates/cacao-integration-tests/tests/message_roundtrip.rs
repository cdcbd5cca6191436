//! Text and capability round-trips across namespaces.

use cacao_siwx::{
    CapabilityFactory, ChainIdLine, FormatterRegistry, MessageFormatter, SiwxError, SiwxMessage,
};
use cacao_test::{WEB3_ADDRESS, test_siwe_request, test_siws_request, test_solana_keypair};
use cacao_verify::VerificationEngine;

fn requests() -> Vec<(MessageFormatter, SiwxMessage)> {
    let solana = test_solana_keypair();
    vec![
        (MessageFormatter::ethereum(), test_siwe_request(WEB3_ADDRESS)),
        (
            MessageFormatter::ethereum(),
            SiwxMessage::new("localhost:3000", WEB3_ADDRESS, "http://localhost:3000", "1", "137")
                .with_not_before("2021-09-30T16:30:00Z")
                .with_expiration_time("2021-10-30T16:30:00.123+02:00")
                .with_request_id("some-request")
                .with_resources(Vec::<String>::new()),
        ),
        (
            MessageFormatter::solana(),
            test_siws_request(&solana.address()),
        ),
    ]
}

#[test]
fn test_parse_inverts_render() {
    for (formatter, request) in requests() {
        let rendered = formatter.render(&request).unwrap();
        assert_eq!(formatter.parse(&rendered.text).unwrap(), rendered.message);
    }
}

#[test]
fn test_capability_inverts_message() {
    for (formatter, request) in requests() {
        let message = formatter.render(&request).unwrap().message.with_signature("sig");
        let cacao = formatter.from_chain_message(&message).unwrap();
        assert_eq!(formatter.to_chain_message(&cacao).unwrap(), message);
    }
}

#[test]
fn test_engine_reconstructs_signed_text() {
    let engine = VerificationEngine::with_defaults();
    for (formatter, request) in requests() {
        let rendered = formatter.render(&request).unwrap();
        let cacao = formatter.from_chain_message(&rendered.message).unwrap();
        assert_eq!(engine.signed_message(&cacao).unwrap(), rendered.text);
    }
}

#[test]
fn test_empty_resources_survive_roundtrip() {
    let formatter = MessageFormatter::ethereum();
    let request = test_siwe_request(WEB3_ADDRESS).with_resources(Vec::<String>::new());
    let rendered = formatter.render(&request).unwrap();

    assert!(rendered.text.ends_with("\nResources:"));
    let parsed = formatter.parse(&rendered.text).unwrap();
    assert_eq!(parsed.resources, Some(Vec::new()));
}

#[test]
fn test_formatter_without_chain_id_line() {
    let formatter = MessageFormatter::new("mina", "Mina", "caip122", "mina:schnorr")
        .with_chain_id_line(ChainIdLine::Omit {
            reference: "mainnet".to_string(),
        });
    let request = SiwxMessage::new(
        "service.org",
        "B62qexample",
        "https://service.org",
        "1",
        "mainnet",
    )
    .with_nonce("abcdefgh")
    .with_issued_at("2021-09-30T16:25:24Z");

    let rendered = formatter.render(&request).unwrap();
    assert!(!rendered.text.contains("Chain ID:"));
    assert_eq!(formatter.parse(&rendered.text).unwrap(), rendered.message);

    let other_chain = SiwxMessage {
        chain_id: "devnet".to_string(),
        ..request
    };
    assert!(matches!(
        formatter.render(&other_chain),
        Err(SiwxError::InvalidField { field: "chain_id", .. })
    ));
}

#[test]
fn test_registry_routes_by_namespace() {
    let registry = FormatterRegistry::global();
    assert_eq!(registry.namespaces(), vec!["eip155", "solana"]);

    let rendered = MessageFormatter::ethereum()
        .render(&test_siwe_request(WEB3_ADDRESS))
        .unwrap();
    let cacao = registry
        .from_chain_message("eip155", &rendered.message)
        .unwrap();
    assert_eq!(cacao.header().format(), "eip4361");

    assert!(matches!(
        registry.from_chain_message("cosmos", &rendered.message),
        Err(SiwxError::UnsupportedNamespace { .. })
    ));
}
