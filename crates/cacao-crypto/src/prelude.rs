//! Prelude module - commonly used types for convenient import.
//!
//! Use `use cacao_crypto::prelude::*;` to import all essential types.

// Errors
pub use crate::{CryptoError, CryptoResult};

// Wallets
pub use crate::{EthereumWallet, SolanaKeyPair};
