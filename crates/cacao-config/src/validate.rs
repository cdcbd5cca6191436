//! Checks applied after all layers are merged.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Largest accepted clock skew (one day).
pub const MAX_CLOCK_SKEW_SECS: u64 = 86_400;

/// Largest accepted revocation phase-out (thirty days).
pub const MAX_PHASE_OUT_SECS: u64 = 2_592_000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 4] = ["pretty", "compact", "json", "full"];
const LOG_TARGETS: [&str; 3] = ["stderr", "stdout", "file"];
const LOG_ROTATIONS: [&str; 3] = ["daily", "hourly", "never"];

/// Range and enumeration checks on the merged configuration.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] naming the first bad key.
pub fn validate(config: &Config) -> ConfigResult<()> {
    let v = &config.verification;
    at_most("verification.clock_skew_secs", v.clock_skew_secs, MAX_CLOCK_SKEW_SECS)?;
    at_most(
        "verification.revocation_phase_out_secs",
        v.revocation_phase_out_secs,
        MAX_PHASE_OUT_SECS,
    )?;
    let logging = &config.logging;
    one_of("logging.level", &logging.level, &LOG_LEVELS)?;
    one_of("logging.format", &logging.format, &LOG_FORMATS)?;
    one_of("logging.target", &logging.target, &LOG_TARGETS)?;
    one_of("logging.rotation", &logging.rotation, &LOG_ROTATIONS)?;
    if logging.target == "file" && logging.directory.is_none() {
        return Err(ConfigError::ValidationError {
            field: "logging.directory".to_owned(),
            message: "required when target is 'file'".to_owned(),
        });
    }
    Ok(())
}

fn at_most(field: &str, value: u64, max: u64) -> ConfigResult<()> {
    if value <= max {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        field: field.to_owned(),
        message: format!("{value}s exceeds the {max}s ceiling"),
    })
}

fn one_of(field: &str, value: &str, allowed: &[&str]) -> ConfigResult<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        field: field.to_owned(),
        message: format!("'{value}' is not one of {}", allowed.join("|")),
    })
}
