#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Layered configuration for the cacao tools.
//!
//! # Usage
//!
//! ```rust,no_run
//! use cacao_config::Config;
//!
//! let resolved = Config::load(None).unwrap();
//! println!("clock skew: {}s", resolved.config.verification.clock_skew_secs);
//! ```
//!
//! # Layers
//!
//! Later layers win:
//!
//! 1. `defaults.toml`, compiled in
//! 2. `~/.cacao/config.toml` (`$CACAO_HOME/config.toml` when set)
//! 3. the file passed as `--config`
//! 4. `CACAO_*` variables
//!
//! Sections are plain data; the verifier and logging crates map them onto
//! their own option types.

/// `CACAO_*` overrides.
pub mod env;
/// Load errors.
pub mod error;
/// Layer discovery and merging.
pub mod loader;
/// The configuration schema.
pub mod types;
/// Range checks.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::ResolvedConfig;
pub use types::*;

impl Config {
    /// Resolve every layer, reading the process environment.
    ///
    /// # Errors
    ///
    /// See [`loader::load`].
    pub fn load(explicit: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit, None)
    }

    /// As [`Config::load`], reading the user layer from `cacao_home`.
    ///
    /// # Errors
    ///
    /// See [`loader::load`].
    pub fn load_with_home(
        explicit: Option<&std::path::Path>,
        cacao_home: &std::path::Path,
    ) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit, Some(cacao_home))
    }
}
