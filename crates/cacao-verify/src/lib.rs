//! Cacao Verify - Verification of chain-agnostic sign-in capabilities.
//!
//! [`VerificationEngine`] checks a [`Cacao`](cacao_core::Cacao) at a point in
//! time: signature presence, the validity window with clock-skew and
//! revocation phase-out tolerance, and the wallet signature over the
//! reconstructed sign-in text.
//!
//! New chains and signature schemes are added by registration:
//! - message formats through [`FormatterRegistry`](cacao_siwx::FormatterRegistry)
//! - signature schemes through [`SchemeRegistry`] and [`SchemeVerifier`]

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod engine;
pub mod options;
pub mod registry;
pub mod scheme;

mod error;

pub use engine::{VerificationEngine, verify};
pub use error::{VerificationError, VerifyResult};
pub use options::{DEFAULT_CLOCK_SKEW_SECS, VerifyOptions};
pub use registry::SchemeRegistry;
pub use scheme::{Eip191Verifier, SchemeVerifier, SolanaEd25519Verifier};
