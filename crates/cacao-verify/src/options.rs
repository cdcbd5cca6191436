//! Verification options.

use cacao_config::VerificationSection;
use chrono::{DateTime, Utc};

/// Default tolerance for clock differences between issuer and verifier.
pub const DEFAULT_CLOCK_SKEW_SECS: u64 = 300;

/// Tunables for a single verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Verification time; `None` uses the wall clock.
    pub at_time: Option<DateTime<Utc>>,
    /// Tolerance applied to both ends of the validity window.
    pub clock_skew_secs: u64,
    /// Grace period after expiration during which the capability still verifies.
    pub revocation_phase_out_secs: u64,
    /// Skip the expiration check entirely.
    pub disable_expiration_check: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            at_time: None,
            clock_skew_secs: DEFAULT_CLOCK_SKEW_SECS,
            revocation_phase_out_secs: 0,
            disable_expiration_check: false,
        }
    }
}

impl VerifyOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify as of a fixed time.
    #[must_use]
    pub fn at(mut self, at_time: DateTime<Utc>) -> Self {
        self.at_time = Some(at_time);
        self
    }

    /// Set the clock skew tolerance.
    #[must_use]
    pub fn with_clock_skew_secs(mut self, secs: u64) -> Self {
        self.clock_skew_secs = secs;
        self
    }

    /// Set the revocation phase-out period.
    #[must_use]
    pub fn with_revocation_phase_out_secs(mut self, secs: u64) -> Self {
        self.revocation_phase_out_secs = secs;
        self
    }

    /// Enable or disable the expiration check.
    #[must_use]
    pub fn with_expiration_check(mut self, enabled: bool) -> Self {
        self.disable_expiration_check = !enabled;
        self
    }

    /// The verification time: `at_time`, or now.
    #[must_use]
    pub fn effective_time(&self) -> DateTime<Utc> {
        self.at_time.unwrap_or_else(Utc::now)
    }
}

impl From<&VerificationSection> for VerifyOptions {
    fn from(section: &VerificationSection) -> Self {
        Self {
            at_time: None,
            clock_skew_secs: section.clock_skew_secs,
            revocation_phase_out_secs: section.revocation_phase_out_secs,
            disable_expiration_check: section.disable_expiration_check,
        }
    }
}
