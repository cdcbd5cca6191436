//! Configuration struct definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Complete configuration.
///
/// Every section defaults to the values in the embedded `defaults.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Capability verification tolerances.
    pub verification: VerificationSection,
    /// `[logging]`.
    pub logging: LoggingSection,
}

/// Capability verification tolerances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationSection {
    /// Tolerance for clock differences, applied to both ends of the
    /// validity window.
    pub clock_skew_secs: u64,
    /// Grace period after expiration during which a capability still
    /// verifies.
    pub revocation_phase_out_secs: u64,
    /// Skip the expiration check entirely.
    pub disable_expiration_check: bool,
}

impl Default for VerificationSection {
    fn default() -> Self {
        Self {
            clock_skew_secs: 300,
            revocation_phase_out_secs: 0,
            disable_expiration_check: false,
        }
    }
}

/// The `[logging]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Base level, `trace` through `error`.
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["cacao_verify=debug"]`).
    pub directives: Vec<String>,
    /// Sink: `"stderr"`, `"stdout"` or `"file"`.
    pub target: String,
    /// Directory for rolling files; required when `target = "file"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Rolling period for file output: `"daily"`, `"hourly"` or `"never"`.
    pub rotation: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
            target: "stderr".to_owned(),
            directory: None,
            rotation: "daily".to_owned(),
        }
    }
}
