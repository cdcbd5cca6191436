//! Packaging sign-in messages into capabilities and back.

use cacao_core::{Cacao, Header, Payload, PkhDid, Signature};

use crate::error::{SiwxError, SiwxResult};
use crate::formatter::MessageFormatter;
use crate::message::SiwxMessage;

/// Converts between a namespace's sign-in messages and [`Cacao`] values.
///
/// For every well-formed message `m`,
/// `to_chain_message(&from_chain_message(&m)?)? == m`.
#[allow(clippy::wrong_self_convention)]
pub trait CapabilityFactory {
    /// Package a rendered (and optionally signed) message.
    ///
    /// # Errors
    ///
    /// Returns [`SiwxError::MissingField`] if the message has not been
    /// rendered (no nonce or issuance time) and
    /// [`SiwxError::UnsupportedIssuerFormat`] if the address and chain id do
    /// not form a valid `did:pkh`.
    fn from_chain_message(&self, message: &SiwxMessage) -> SiwxResult<Cacao>;

    /// Reconstruct the sign-in message a capability was built from.
    ///
    /// # Errors
    ///
    /// Returns [`SiwxError::UnsupportedIssuerFormat`],
    /// [`SiwxError::NamespaceMismatch`] or [`SiwxError::UnsupportedHeader`]
    /// when the capability does not belong to this namespace.
    fn to_chain_message(&self, cacao: &Cacao) -> SiwxResult<SiwxMessage>;
}

impl CapabilityFactory for MessageFormatter {
    fn from_chain_message(&self, message: &SiwxMessage) -> SiwxResult<Cacao> {
        let nonce = message
            .nonce
            .clone()
            .ok_or(SiwxError::MissingField { field: "nonce" })?;
        let issued_at = message
            .issued_at
            .clone()
            .ok_or(SiwxError::MissingField { field: "issued_at" })?;

        let issuer = PkhDid::new(self.namespace(), &message.chain_id, &message.address)?;

        let payload = Payload {
            domain: message.domain.clone(),
            issuer: issuer.to_string(),
            audience: message.uri.clone(),
            version: message.version.clone(),
            nonce,
            issued_at,
            not_before: message.not_before.clone(),
            expiration_time: message.expiration_time.clone(),
            statement: message.statement.clone(),
            request_id: message.request_id.clone(),
            resources: message.resources.clone(),
        };

        let cacao = Cacao::new(Header::new(self.header_type()), payload);
        Ok(match &message.signature {
            Some(value) => {
                let scheme = message
                    .signature_type
                    .as_deref()
                    .unwrap_or(self.signature_scheme());
                cacao.with_signature(Signature::new(scheme, value))
            },
            None => cacao,
        })
    }

    fn to_chain_message(&self, cacao: &Cacao) -> SiwxResult<SiwxMessage> {
        let issuer = cacao.payload().issuer_did()?;
        if issuer.namespace() != self.namespace() {
            return Err(SiwxError::NamespaceMismatch {
                expected: self.namespace().to_string(),
                actual: issuer.namespace().to_string(),
            });
        }
        if cacao.header().format() != self.header_type() {
            return Err(SiwxError::UnsupportedHeader {
                expected: self.header_type().to_string(),
                actual: cacao.header().format().to_string(),
            });
        }

        let p = cacao.payload();
        let signature = cacao.signature();
        Ok(SiwxMessage {
            domain: p.domain.clone(),
            address: issuer.address().to_string(),
            statement: p.statement.clone(),
            uri: p.audience.clone(),
            version: p.version.clone(),
            chain_id: issuer.reference().to_string(),
            nonce: Some(p.nonce.clone()),
            issued_at: Some(p.issued_at.clone()),
            expiration_time: p.expiration_time.clone(),
            not_before: p.not_before.clone(),
            request_id: p.request_id.clone(),
            resources: p.resources.clone(),
            signature: signature.map(|s| s.value.clone()),
            signature_type: signature
                .filter(|s| s.scheme != self.signature_scheme())
                .map(|s| s.scheme.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cacao_core::{HEADER_CAIP122, HEADER_EIP4361, SCHEME_EIP191};

    fn message() -> SiwxMessage {
        SiwxMessage::new(
            "service.org",
            "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            "https://service.org/login",
            "1",
            "1",
        )
        .with_statement("I accept the ServiceOrg Terms of Service: https://service.org/tos")
        .with_nonce("32891757")
        .with_issued_at("2021-09-30T16:25:24.000Z")
        .with_resources([
            "ipfs://Qme7ss3ARVgxv6rXqVPiikMJ8u2NLgmgszg13pYrDKEoiu",
            "https://example.com/my-web2-claim.json",
        ])
        .with_signature("0x1234")
    }

    #[test]
    fn test_from_chain_message() {
        let cacao = MessageFormatter::ethereum()
            .from_chain_message(&message())
            .unwrap();

        assert_eq!(cacao.header().format(), HEADER_EIP4361);
        assert_eq!(
            cacao.issuer(),
            "did:pkh:eip155:1:0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
        );
        assert_eq!(cacao.payload().audience, "https://service.org/login");
        assert_eq!(cacao.payload().expiration_time, None);
        assert_eq!(cacao.signature().unwrap(), &Signature::new(SCHEME_EIP191, "0x1234"));
    }

    #[test]
    fn test_unsigned_message_gives_unsigned_cacao() {
        let mut msg = message();
        msg.signature = None;
        let cacao = MessageFormatter::ethereum().from_chain_message(&msg).unwrap();
        assert!(!cacao.is_signed());
    }

    #[test]
    fn test_roundtrip_law() {
        let f = MessageFormatter::ethereum();
        let full = message()
            .with_expiration_time("2021-10-01T00:00:00Z")
            .with_not_before("2021-09-30T00:00:00Z")
            .with_request_id("r-1")
            .with_statement("");
        let mut bare = message();
        bare.statement = None;
        bare.resources = None;
        bare.signature = None;

        for m in [message(), full, bare] {
            let back = f.to_chain_message(&f.from_chain_message(&m).unwrap()).unwrap();
            assert_eq!(back, m);
        }
    }

    #[test]
    fn test_missing_rendered_fields() {
        let f = MessageFormatter::ethereum();
        let mut msg = message();
        msg.nonce = None;
        assert_eq!(
            f.from_chain_message(&msg).unwrap_err(),
            SiwxError::MissingField { field: "nonce" }
        );

        let mut msg = message();
        msg.issued_at = None;
        assert_eq!(
            f.from_chain_message(&msg).unwrap_err(),
            SiwxError::MissingField { field: "issued_at" }
        );
    }

    #[test]
    fn test_bad_address_rejected() {
        let mut msg = message();
        msg.address = "0x abc".to_string();
        assert!(matches!(
            MessageFormatter::ethereum().from_chain_message(&msg),
            Err(SiwxError::UnsupportedIssuerFormat { .. })
        ));
    }

    #[test]
    fn test_to_chain_message_checks_namespace_and_header() {
        let eth = MessageFormatter::ethereum();
        let sol = MessageFormatter::solana();
        let cacao = eth.from_chain_message(&message()).unwrap();

        assert!(matches!(
            sol.to_chain_message(&cacao),
            Err(SiwxError::NamespaceMismatch { .. })
        ));

        let mut wrong_header = cacao.clone();
        wrong_header.h = Header::new(HEADER_CAIP122);
        assert!(matches!(
            eth.to_chain_message(&wrong_header),
            Err(SiwxError::UnsupportedHeader { .. })
        ));

        let mut bad_issuer = cacao;
        bad_issuer.p.issuer = "did:key:z6Mk".to_string();
        assert!(matches!(
            eth.to_chain_message(&bad_issuer),
            Err(SiwxError::UnsupportedIssuerFormat { .. })
        ));
    }

    #[test]
    fn test_non_default_scheme_survives_roundtrip() {
        let f = MessageFormatter::ethereum();
        let cacao = f
            .from_chain_message(&message())
            .unwrap()
            .with_signature(Signature::new("eip1271", "0xdead"));

        let msg = f.to_chain_message(&cacao).unwrap();
        assert_eq!(msg.signature_type.as_deref(), Some("eip1271"));
        assert_eq!(msg.signature.as_deref(), Some("0xdead"));
        assert_eq!(f.from_chain_message(&msg).unwrap(), cacao);
    }

    #[test]
    fn test_default_scheme_is_left_implicit() {
        let f = MessageFormatter::ethereum();
        let cacao = f.from_chain_message(&message()).unwrap();

        let msg = f.to_chain_message(&cacao).unwrap();
        assert_eq!(msg.signature_type, None);
        assert_eq!(f.from_chain_message(&msg).unwrap(), cacao);
    }

    #[test]
    fn test_typed_signature_message_roundtrip() {
        let f = MessageFormatter::ethereum();
        let m = message().with_typed_signature("eip1271", "0xbeef");
        let cacao = f.from_chain_message(&m).unwrap();
        assert_eq!(cacao.signature().unwrap(), &Signature::new("eip1271", "0xbeef"));
        assert_eq!(f.to_chain_message(&cacao).unwrap(), m);
    }
}
