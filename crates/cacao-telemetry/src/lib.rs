//! Cacao Telemetry - Logging for the cacao tools.
//!
//! Library crates only emit `tracing` events; binaries call
//! [`setup_logging`] once to install a subscriber.
//!
//! # Example
//!
//! ```rust,no_run
//! use cacao_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), cacao_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Pretty)
//!     .with_directive("cacao_verify=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    FileRotation, LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging,
};
