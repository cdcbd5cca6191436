//! Cacao Crypto - Signature scheme primitives for sign-in capabilities.
//!
//! This crate provides the default signature schemes used to verify
//! wallet-signed sign-in messages:
//! - EIP-191 `personal_sign` over secp256k1 (Ethereum accounts)
//! - Ed25519 over raw message bytes (Solana accounts)
//!
//! Each scheme exposes a `verify(address, message, signature)` function and a
//! wallet type that signs the way real wallets do, so capabilities can be
//! produced in tests and tooling without an external wallet.
//!
//! # Example
//!
//! ```
//! use cacao_crypto::{EthereumWallet, ethereum};
//!
//! let wallet = EthereumWallet::generate();
//! let message = b"service.org wants you to sign in";
//! let signature = wallet.sign_message(message).unwrap();
//!
//! assert!(ethereum::verify(&wallet.address(), message, &signature).is_ok());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod ethereum;
pub mod solana;

mod error;

pub use error::{CryptoError, CryptoResult};
pub use ethereum::EthereumWallet;
pub use solana::SolanaKeyPair;
