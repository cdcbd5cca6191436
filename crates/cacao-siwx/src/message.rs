//! The structured sign-in request.

use serde::{Deserialize, Serialize};

/// A Sign-In with X request, before or after rendering.
///
/// `nonce` and `issued_at` may be left empty by the caller; rendering fills
/// them in. `signature` is attached once the wallet has signed the rendered
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiwxMessage {
    /// Authority requesting the sign-in.
    pub domain: String,
    /// Account address in the namespace's own format.
    pub address: String,
    /// Human-readable statement; must be a single line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    /// URI of the relying party or resource.
    pub uri: String,
    /// Message format version.
    pub version: String,
    /// Chain reference within the namespace (e.g. `1` for Ethereum mainnet).
    pub chain_id: String,
    /// Anti-replay token; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Issuance time (RFC 3339); defaults to now when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<String>,
    /// End of validity (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
    /// Start of validity (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<String>,
    /// Opaque correlation id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Resources covered by the sign-in, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
    /// Wallet signature over the rendered text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Scheme of `signature` when it is not the namespace's default
    /// (e.g. `eip1271` for a contract wallet).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub signature_type: Option<String>,
}

impl SiwxMessage {
    /// Create a request with the required fields.
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        address: impl Into<String>,
        uri: impl Into<String>,
        version: impl Into<String>,
        chain_id: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            address: address.into(),
            uri: uri.into(),
            version: version.into(),
            chain_id: chain_id.into(),
            ..Self::default()
        }
    }

    /// Set the statement.
    #[must_use]
    pub fn with_statement(mut self, statement: impl Into<String>) -> Self {
        self.statement = Some(statement.into());
        self
    }

    /// Set the nonce.
    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Set the issuance time.
    #[must_use]
    pub fn with_issued_at(mut self, issued_at: impl Into<String>) -> Self {
        self.issued_at = Some(issued_at.into());
        self
    }

    /// Set the expiration time.
    #[must_use]
    pub fn with_expiration_time(mut self, expiration_time: impl Into<String>) -> Self {
        self.expiration_time = Some(expiration_time.into());
        self
    }

    /// Set the not-before time.
    #[must_use]
    pub fn with_not_before(mut self, not_before: impl Into<String>) -> Self {
        self.not_before = Some(not_before.into());
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

    /// Attach the wallet signature.
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Attach a signature made under a non-default scheme.
    #[must_use]
    pub fn with_typed_signature(
        mut self,
        scheme: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        self.signature_type = Some(scheme.into());
        self.signature = Some(signature.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_uses_camel_case() {
        let msg = SiwxMessage::new("a.org", "0xabc", "https://a.org", "1", "1")
            .with_issued_at("2021-09-30T16:25:24.000Z")
            .with_request_id("r");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["chainId"], "1");
        assert_eq!(value["issuedAt"], "2021-09-30T16:25:24.000Z");
        assert_eq!(value["requestId"], "r");
        assert!(value.get("nonce").is_none());
        assert!(value.get("type").is_none());
    }

    #[test]
    fn test_signature_type_serializes_as_type() {
        let msg = SiwxMessage::new("a.org", "0xabc", "https://a.org", "1", "1")
            .with_typed_signature("eip1271", "0xdead");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "eip1271");
        assert_eq!(value["signature"], "0xdead");
    }

    #[test]
    fn test_minimal_json_deserializes() {
        let msg: SiwxMessage = serde_json::from_str(
            r#"{"domain":"a.org","address":"0xabc","uri":"https://a.org","version":"1","chainId":"1"}"#,
        )
        .unwrap();
        assert_eq!(msg, SiwxMessage::new("a.org", "0xabc", "https://a.org", "1", "1"));
    }
}
