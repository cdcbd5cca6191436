//! The verification engine.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. the capability must be signed
//! 2. `iat` and `nbf` must not lie beyond the verification time plus skew
//! 3. `exp` plus phase-out plus skew must not lie before the verification
//!    time (unless the expiration check is disabled)
//! 4. the signed text is reconstructed through the issuer's namespace
//! 5. the signature scheme's verifier must accept the signature

use std::sync::LazyLock;

use cacao_core::{Cacao, PkhDid, parse_timestamp};
use cacao_siwx::{CapabilityFactory, FormatterRegistry, SiwxError};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, instrument, warn};

use crate::error::{VerificationError, VerifyResult};
use crate::options::VerifyOptions;
use crate::registry::SchemeRegistry;

static GLOBAL: LazyLock<VerificationEngine> = LazyLock::new(VerificationEngine::with_defaults);

/// Verifies capabilities against registered namespaces and schemes.
#[derive(Debug, Clone)]
pub struct VerificationEngine {
    formatters: FormatterRegistry,
    schemes: SchemeRegistry,
}

impl VerificationEngine {
    /// Create an engine from explicit registries.
    #[must_use]
    pub fn new(formatters: FormatterRegistry, schemes: SchemeRegistry) -> Self {
        Self {
            formatters,
            schemes,
        }
    }

    /// Create an engine with the built-in namespaces and schemes.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(
            FormatterRegistry::with_defaults(),
            SchemeRegistry::with_defaults(),
        )
    }

    /// The process-wide engine with the built-in registries.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// The namespace registry.
    #[must_use]
    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// The scheme registry.
    #[must_use]
    pub fn schemes(&self) -> &SchemeRegistry {
        &self.schemes
    }

    /// Verify a capability.
    ///
    /// # Errors
    ///
    /// Returns the first [`VerificationError`] encountered, in the order
    /// documented on this module.
    #[instrument(skip_all, fields(issuer = %cacao.issuer()))]
    pub fn verify(&self, cacao: &Cacao, options: &VerifyOptions) -> VerifyResult<()> {
        let result = self.check(cacao, options);
        match &result {
            Ok(()) => debug!("Capability verified"),
            Err(e) => warn!(reason = %e, "Capability rejected"),
        }
        result
    }

    fn check(&self, cacao: &Cacao, options: &VerifyOptions) -> VerifyResult<()> {
        let signature = cacao
            .signature()
            .ok_or(VerificationError::MissingSignature)?;

        let effective = options.effective_time();
        let skew = seconds(options.clock_skew_secs);
        let latest_start = add_saturating(effective, skew);

        let payload = cacao.payload();
        let issued_at = timestamp("iat", &payload.issued_at)?;
        if issued_at > latest_start {
            return Err(VerificationError::NotYetValid {
                field: "iat",
                valid_from: payload.issued_at.clone(),
            });
        }
        if let Some(raw) = &payload.not_before
            && timestamp("nbf", raw)? > latest_start
        {
            return Err(VerificationError::NotYetValid {
                field: "nbf",
                valid_from: raw.clone(),
            });
        }

        if !options.disable_expiration_check
            && let Some(raw) = &payload.expiration_time
        {
            let expires = timestamp("exp", raw)?;
            let phase_out = seconds(options.revocation_phase_out_secs);
            let deadline = add_saturating(add_saturating(expires, phase_out), skew);
            if deadline < effective {
                return Err(VerificationError::Expired {
                    expired_at: raw.clone(),
                });
            }
        }

        let (issuer, text) = self.reconstruct(cacao)?;

        let verifier = self.schemes.get(&signature.scheme).ok_or_else(|| {
            VerificationError::UnsupportedScheme {
                scheme: signature.scheme.clone(),
            }
        })?;
        if !verifier.verify(issuer.address(), text.as_bytes(), &signature.value) {
            return Err(VerificationError::InvalidSignature);
        }
        Ok(())
    }

    /// Reconstruct the exact text the issuer signed.
    ///
    /// # Errors
    ///
    /// Returns an error if the issuer, namespace or header is not supported,
    /// or the payload cannot be rendered canonically.
    pub fn signed_message(&self, cacao: &Cacao) -> VerifyResult<String> {
        self.reconstruct(cacao).map(|(_, text)| text)
    }

    fn reconstruct(&self, cacao: &Cacao) -> VerifyResult<(PkhDid, String)> {
        let issuer = cacao.payload().issuer_did().map_err(|e| match e {
            cacao_core::CoreError::UnsupportedIssuerFormat { issuer, reason } => {
                VerificationError::UnsupportedIssuerFormat { issuer, reason }
            },
            other => VerificationError::MalformedPayload(other.to_string()),
        })?;

        let formatter = self.formatters.get(issuer.namespace()).ok_or_else(|| {
            VerificationError::UnsupportedNamespace {
                namespace: issuer.namespace().to_string(),
            }
        })?;

        let message = formatter.to_chain_message(cacao).map_err(from_siwx)?;
        let rendered = formatter.render(&message).map_err(from_siwx)?;
        Ok((issuer, rendered.text))
    }
}

impl Default for VerificationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Verify a capability with the process-wide engine.
///
/// # Errors
///
/// See [`VerificationEngine::verify`].
pub fn verify(cacao: &Cacao, options: &VerifyOptions) -> VerifyResult<()> {
    VerificationEngine::global().verify(cacao, options)
}

fn from_siwx(err: SiwxError) -> VerificationError {
    match err {
        SiwxError::UnsupportedIssuerFormat { issuer, reason } => {
            VerificationError::UnsupportedIssuerFormat { issuer, reason }
        },
        SiwxError::UnsupportedHeader { expected, actual } => {
            VerificationError::UnsupportedHeader { expected, actual }
        },
        SiwxError::UnsupportedNamespace { namespace }
        | SiwxError::NamespaceMismatch {
            actual: namespace, ..
        } => VerificationError::UnsupportedNamespace { namespace },
        other => VerificationError::MalformedPayload(other.to_string()),
    }
}

fn timestamp(field: &'static str, value: &str) -> VerifyResult<DateTime<Utc>> {
    parse_timestamp(value).map_err(|_| VerificationError::MalformedTimestamp {
        field,
        value: value.to_string(),
    })
}

fn seconds(secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

fn add_saturating(at: DateTime<Utc>, delta: TimeDelta) -> DateTime<Utc> {
    at.checked_add_signed(delta)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
