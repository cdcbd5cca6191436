//! Chain-agnostic capability objects.
//!
//! A [`Cacao`] is the packaged form of a wallet-signed sign-in message:
//! - a [`Header`] naming the message-format family
//! - a [`Payload`] carrying the authorization claim
//! - an optional [`Signature`] (absent until the wallet has signed)
//!
//! Field names on the wire follow the CACAO layout (`h`, `p`, `s`, `iss`,
//! `iat`, ...). Optional payload fields are omitted when absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::did::PkhDid;
use crate::error::CoreResult;
use crate::time::parse_timestamp;

/// Header type of Sign-In with Ethereum messages.
pub const HEADER_EIP4361: &str = "eip4361";

/// Header type of generic Sign-In with X messages.
pub const HEADER_CAIP122: &str = "caip122";

/// Message-format family tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Header {
    /// Format tag, e.g. `eip4361`.
    pub t: String,
}

impl Header {
    /// Create a header with the given format tag.
    #[must_use]
    pub fn new(t: impl Into<String>) -> Self {
        Self { t: t.into() }
    }

    /// The format tag.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.t
    }
}

/// The authorization claim of a capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Authority requesting the sign-in.
    pub domain: String,
    /// `did:pkh` identifier of the signing account.
    #[serde(rename = "iss")]
    pub issuer: String,
    /// URI of the relying party or resource.
    #[serde(rename = "aud")]
    pub audience: String,
    /// Message format version.
    pub version: String,
    /// Anti-replay token chosen by the relying party.
    pub nonce: String,
    /// Issuance time (RFC 3339).
    #[serde(rename = "iat")]
    pub issued_at: String,
    /// Start of validity (RFC 3339).
    #[serde(rename = "nbf", default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<String>,
    /// End of validity (RFC 3339).
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
    /// Human-readable statement the user agrees to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    /// Opaque correlation id.
    #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Resources the capability covers, in signing order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

impl Payload {
    /// Create a payload with the required fields.
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        version: impl Into<String>,
        nonce: impl Into<String>,
        issued_at: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            version: version.into(),
            nonce: nonce.into(),
            issued_at: issued_at.into(),
            not_before: None,
            expiration_time: None,
            statement: None,
            request_id: None,
            resources: None,
        }
    }

    /// Set the not-before time.
    #[must_use]
    pub fn with_not_before(mut self, not_before: impl Into<String>) -> Self {
        self.not_before = Some(not_before.into());
        self
    }

    /// Set the expiration time.
    #[must_use]
    pub fn with_expiration_time(mut self, expiration_time: impl Into<String>) -> Self {
        self.expiration_time = Some(expiration_time.into());
        self
    }

    /// Set the statement.
    #[must_use]
    pub fn with_statement(mut self, statement: impl Into<String>) -> Self {
        self.statement = Some(statement.into());
        self
    }

    /// Set the request id.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Set the resource list.
    #[must_use]
    pub fn with_resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = Some(resources.into_iter().map(Into::into).collect());
        self
    }

    /// Parse the issuer into its `did:pkh` parts.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedIssuerFormat`](crate::CoreError::UnsupportedIssuerFormat)
    /// if the issuer is not a well-formed `did:pkh`.
    pub fn issuer_did(&self) -> CoreResult<PkhDid> {
        PkhDid::parse(&self.issuer)
    }

    /// Issuance time as UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if `iat` is not RFC 3339.
    pub fn issued_at_time(&self) -> CoreResult<DateTime<Utc>> {
        parse_timestamp(&self.issued_at)
    }

    /// Not-before time as UTC, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if `nbf` is present but not RFC 3339.
    pub fn not_before_time(&self) -> CoreResult<Option<DateTime<Utc>>> {
        self.not_before.as_deref().map(parse_timestamp).transpose()
    }

    /// Expiration time as UTC, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if `exp` is present but not RFC 3339.
    pub fn expiration_time_utc(&self) -> CoreResult<Option<DateTime<Utc>>> {
        self.expiration_time
            .as_deref()
            .map(parse_timestamp)
            .transpose()
    }
}

/// Scheme tag of EIP-191 `personal_sign` signatures.
pub const SCHEME_EIP191: &str = "eip191";

/// Scheme tag of Solana Ed25519 signatures.
pub const SCHEME_SOLANA_ED25519: &str = "solana:ed25519";

/// A wallet signature over the rendered sign-in message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    /// Signature scheme tag, e.g. `eip191`.
    #[serde(rename = "t")]
    pub scheme: String,
    /// Signature in the scheme's text encoding.
    #[serde(rename = "s")]
    pub value: String,
}

impl Signature {
    /// Create a signature.
    #[must_use]
    pub fn new(scheme: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            value: value.into(),
        }
    }
}

/// A chain-agnostic capability object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cacao {
    /// Format header.
    pub h: Header,
    /// Authorization claim.
    pub p: Payload,
    /// Wallet signature; `None` while unsigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<Signature>,
}

impl Cacao {
    /// Create an unsigned capability.
    #[must_use]
    pub fn new(header: Header, payload: Payload) -> Self {
        Self {
            h: header,
            p: payload,
            s: None,
        }
    }

    /// Attach (or replace) the signature.
    #[must_use]
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.s = Some(signature);
        self
    }

    /// Whether a signature is attached.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.s.is_some()
    }

    /// The header.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.h
    }

    /// The payload.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.p
    }

    /// The signature, if attached.
    #[must_use]
    pub fn signature(&self) -> Option<&Signature> {
        self.s.as_ref()
    }

    /// The raw issuer string.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.p.issuer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Payload {
        Payload::new(
            "service.org",
            "did:pkh:eip155:1:0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            "https://service.org/login",
            "1",
            "32891757",
            "2021-09-30T16:25:24.000Z",
        )
    }

    #[test]
    fn test_unsigned_then_signed() {
        let cacao = Cacao::new(Header::new(HEADER_EIP4361), payload());
        assert!(!cacao.is_signed());

        let signed = cacao.with_signature(Signature::new(SCHEME_EIP191, "0xabc"));
        assert!(signed.is_signed());
        assert_eq!(signed.signature().unwrap().scheme, SCHEME_EIP191);
    }

    #[test]
    fn test_json_field_names() {
        let cacao = Cacao::new(
            Header::new(HEADER_EIP4361),
            payload()
                .with_statement("hello")
                .with_request_id("req-1")
                .with_expiration_time("2021-10-01T00:00:00Z"),
        )
        .with_signature(Signature::new(SCHEME_EIP191, "0x00"));

        let value = serde_json::to_value(&cacao).unwrap();
        assert_eq!(value["h"], json!({ "t": "eip4361" }));
        assert_eq!(value["s"], json!({ "t": "eip191", "s": "0x00" }));
        assert_eq!(value["p"]["iat"], "2021-09-30T16:25:24.000Z");
        assert_eq!(value["p"]["exp"], "2021-10-01T00:00:00Z");
        assert_eq!(value["p"]["requestId"], "req-1");
        assert_eq!(value["p"]["aud"], "https://service.org/login");
    }

    #[test]
    fn test_absent_fields_omitted() {
        let cacao = Cacao::new(Header::new(HEADER_EIP4361), payload());
        let value = serde_json::to_value(&cacao).unwrap();

        assert!(value.get("s").is_none());
        let p = value["p"].as_object().unwrap();
        for key in ["nbf", "exp", "statement", "requestId", "resources"] {
            assert!(!p.contains_key(key), "{key} should be omitted");
        }
    }

    #[test]
    fn test_empty_statement_is_present() {
        let cacao = Cacao::new(Header::new(HEADER_EIP4361), payload().with_statement(""));
        let json = serde_json::to_string(&cacao).unwrap();
        let back: Cacao = serde_json::from_str(&json).unwrap();
        assert_eq!(back.p.statement.as_deref(), Some(""));
    }

    #[test]
    fn test_resource_order_preserved() {
        let p = payload().with_resources(["ipfs://b", "https://a"]);
        let json = serde_json::to_string(&p).unwrap();
        let back: Payload = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.resources.unwrap(),
            vec!["ipfs://b".to_string(), "https://a".to_string()]
        );
    }

    #[test]
    fn test_time_accessors() {
        let p = payload().with_not_before("not a time");
        assert!(p.issued_at_time().is_ok());
        assert!(p.not_before_time().is_err());
        assert_eq!(p.expiration_time_utc().unwrap(), None);
    }

    #[test]
    fn test_issuer_did() {
        let did = payload().issuer_did().unwrap();
        assert_eq!(did.namespace(), "eip155");
        assert_eq!(did.reference(), "1");
    }
}
