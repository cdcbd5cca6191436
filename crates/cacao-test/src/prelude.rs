//! Prelude module - commonly used test utilities.
//!
//! Use `use cacao_test::prelude::*;` to import all essential helpers.

// Fixtures
pub use crate::fixtures::{
    WEB3_ADDRESS, WEB3_SECRET, signed_cacao, signed_ethereum_cacao, signed_solana_cacao,
    test_ethereum_wallet, test_issued_at, test_siws_request, test_siwe_request,
    test_solana_keypair,
};

// Mocks
pub use crate::mocks::{MockSchemeVerifier, VerifyCall};

pub use crate::init_test_logging;
