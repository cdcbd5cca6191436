//! Timestamp helpers.
//!
//! Capability timestamps are carried as text so that the signed message and
//! the payload never disagree on formatting. They are only interpreted when
//! a time comparison is needed.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{CoreError, CoreResult};

/// Parse an RFC 3339 timestamp into UTC.
///
/// Fractional seconds and numeric offsets are accepted.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTimestamp`] if `value` is not RFC 3339.
pub fn parse_timestamp(value: &str) -> CoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CoreError::InvalidTimestamp {
            value: value.to_owned(),
            reason: e.to_string(),
        })
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS.sssZ`.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The current wall-clock time, formatted with [`format_timestamp`].
#[must_use]
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}
