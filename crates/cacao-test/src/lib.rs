//! Cacao Test - Shared test utilities for the cacao crates.
//!
//! Deterministic keys, canonical sign-in requests and mock scheme verifiers
//! for use as a dev-dependency.
//!
//! ```rust,ignore
//! use cacao_test::{signed_ethereum_cacao, test_ethereum_wallet, test_siwe_request};
//! use cacao_verify::{VerifyOptions, verify};
//!
//! let wallet = test_ethereum_wallet();
//! let cacao = signed_ethereum_cacao(&wallet, &test_siwe_request(&wallet.address()));
//! verify(&cacao, &VerifyOptions::new().at(cacao_test::test_issued_at())).unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

/// Install a test-writer subscriber honouring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
