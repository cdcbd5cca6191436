//! Errors from subscriber setup.

use thiserror::Error;

/// Failure to install the log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A level, directive or format string was rejected.
    #[error("bad logging setting: {0}")]
    ConfigError(String),

    /// The global subscriber could not be installed.
    #[error("cannot install log subscriber: {0}")]
    InitError(String),

    /// The log directory could not be created.
    #[error("log directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result alias for this crate.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
