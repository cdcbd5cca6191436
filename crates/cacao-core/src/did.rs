//! `did:pkh` issuer identifiers.
//!
//! A capability's issuer is `did:pkh:<namespace>:<reference>:<address>`,
//! i.e. a CAIP-10 account id behind the `did:pkh:` method prefix. The
//! namespace and chain reference follow the CAIP-2 character classes; the
//! address format is opaque here beyond the CAIP-10 character class.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// DID method prefix for blockchain account identifiers.
pub const PKH_PREFIX: &str = "did:pkh:";

const NAMESPACE_LEN: std::ops::RangeInclusive<usize> = 3..=8;
const REFERENCE_LEN: std::ops::RangeInclusive<usize> = 1..=32;
const ADDRESS_LEN: std::ops::RangeInclusive<usize> = 1..=128;

/// A parsed `did:pkh` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PkhDid {
    namespace: String,
    reference: String,
    address: String,
}

impl PkhDid {
    /// Build an identifier from its parts, validating each one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedIssuerFormat`] if any part violates
    /// the CAIP character classes or length bounds.
    pub fn new(
        namespace: impl Into<String>,
        reference: impl Into<String>,
        address: impl Into<String>,
    ) -> CoreResult<Self> {
        let did = Self {
            namespace: namespace.into(),
            reference: reference.into(),
            address: address.into(),
        };
        did.validate()?;
        Ok(did)
    }

    /// Parse `did:pkh:<namespace>:<reference>:<address>`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedIssuerFormat`] if the string does not
    /// match the grammar.
    pub fn parse(issuer: &str) -> CoreResult<Self> {
        let rest = issuer
            .strip_prefix(PKH_PREFIX)
            .ok_or_else(|| unsupported(issuer, "missing did:pkh: prefix"))?;

        let mut parts = rest.splitn(3, ':');
        let (Some(namespace), Some(reference), Some(address)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(unsupported(
                issuer,
                "expected <namespace>:<reference>:<address>",
            ));
        };

        let did = Self {
            namespace: namespace.to_owned(),
            reference: reference.to_owned(),
            address: address.to_owned(),
        };
        did.validate().map_err(|e| match e {
            CoreError::UnsupportedIssuerFormat { reason, .. } => unsupported(issuer, &reason),
            other => other,
        })?;
        Ok(did)
    }

    /// Chain namespace (e.g. `eip155`, `solana`).
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Chain reference within the namespace (e.g. `1`).
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Account address, in the namespace's own format.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// CAIP-2 chain id (`<namespace>:<reference>`).
    #[must_use]
    pub fn chain_id(&self) -> String {
        format!("{}:{}", self.namespace, self.reference)
    }

    fn validate(&self) -> CoreResult<()> {
        let display = self.to_string();
        if !NAMESPACE_LEN.contains(&self.namespace.len())
            || !self
                .namespace
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(unsupported(&display, "namespace must match [-a-z0-9]{3,8}"));
        }
        if !REFERENCE_LEN.contains(&self.reference.len())
            || !self
                .reference
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(unsupported(
                &display,
                "chain reference must match [-_a-zA-Z0-9]{1,32}",
            ));
        }
        if !ADDRESS_LEN.contains(&self.address.len())
            || !self
                .address
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '%'))
        {
            return Err(unsupported(
                &display,
                "address must match [-.%a-zA-Z0-9]{1,128}",
            ));
        }
        Ok(())
    }
}

fn unsupported(issuer: &str, reason: &str) -> CoreError {
    CoreError::UnsupportedIssuerFormat {
        issuer: issuer.to_owned(),
        reason: reason.to_owned(),
    }
}

impl fmt::Display for PkhDid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PKH_PREFIX}{}:{}:{}",
            self.namespace, self.reference, self.address
        )
    }
}

impl FromStr for PkhDid {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PkhDid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PkhDid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ethereum() {
        let did =
            PkhDid::parse("did:pkh:eip155:1:0xb9c5714089478a327f09197987f16f9e5d936e8a").unwrap();
        assert_eq!(did.namespace(), "eip155");
        assert_eq!(did.reference(), "1");
        assert_eq!(did.address(), "0xb9c5714089478a327f09197987f16f9e5d936e8a");
        assert_eq!(did.chain_id(), "eip155:1");
    }

    #[test]
    fn test_parse_solana() {
        let did = PkhDid::parse(
            "did:pkh:solana:4sGjMW1sUnHzSxGspuhpqLDx6wiyjNtZ:CKg5d12Jhpej1JqtmxLJgaFqqeYjxgPqToJ4LBdvG9Ev",
        )
        .unwrap();
        assert_eq!(did.namespace(), "solana");
        assert_eq!(did.reference(), "4sGjMW1sUnHzSxGspuhpqLDx6wiyjNtZ");
    }

    #[test]
    fn test_display_roundtrip() {
        let raw = "did:pkh:eip155:137:0xAbC";
        let did: PkhDid = raw.parse().unwrap();
        assert_eq!(did.to_string(), raw);
        assert_eq!(PkhDid::new("eip155", "137", "0xAbC").unwrap(), did);
    }

    #[test]
    fn test_rejects_bad_grammar() {
        let cases = [
            "eip155:1:0xabc",              // missing prefix
            "did:key:z6Mk",                // other method
            "did:pkh:eip155:1",            // missing address
            "did:pkh:EIP155:1:0xabc",      // uppercase namespace
            "did:pkh:ab:1:0xabc",          // namespace too short
            "did:pkh:eip155::0xabc",       // empty reference
            "did:pkh:eip155:1:",           // empty address
            "did:pkh:eip155:1:0xabc:more", // colon in address
            "did:pkh:eip155:1:0x abc",     // space in address
        ];
        for case in cases {
            assert!(
                matches!(
                    PkhDid::parse(case),
                    Err(CoreError::UnsupportedIssuerFormat { .. })
                ),
                "expected rejection for {case}"
            );
        }
    }

    #[test]
    fn test_reference_length_bound() {
        let long = "a".repeat(33);
        assert!(PkhDid::new("eip155", long, "0xabc").is_err());
        assert!(PkhDid::new("eip155", "a".repeat(32), "0xabc").is_ok());
    }

    #[test]
    fn test_error_names_full_issuer() {
        let err = PkhDid::parse("did:pkh:x:1:0xabc").unwrap_err();
        assert!(err.to_string().contains("did:pkh:x:1:0xabc"));
    }

    #[test]
    fn test_serde_as_string() {
        let did = PkhDid::new("eip155", "1", "0xabc").unwrap();
        let json = serde_json::to_string(&did).unwrap();
        assert_eq!(json, "\"did:pkh:eip155:1:0xabc\"");
        let back: PkhDid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, did);
    }
}
