//! Cacao SIWx - Sign-In with X messages.
//!
//! This crate owns the text a wallet actually signs:
//! - [`SiwxMessage`], the structured sign-in request
//! - [`MessageFormatter`], the canonical layout of one chain namespace with
//!   an exact inverse parser
//! - [`CapabilityFactory`], packaging signed messages into [`Cacao`] values
//!   and reconstructing them for verification
//! - [`FormatterRegistry`], lookup of formatters by namespace tag
//!
//! # Example
//!
//! ```
//! use cacao_siwx::{CapabilityFactory, MessageFormatter, SiwxMessage};
//!
//! let formatter = MessageFormatter::ethereum();
//! let request = SiwxMessage::new(
//!     "service.org",
//!     "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
//!     "https://service.org/login",
//!     "1",
//!     "1",
//! );
//!
//! let rendered = formatter.render(&request).unwrap();
//! assert_eq!(formatter.parse(&rendered.text).unwrap(), rendered.message);
//!
//! let cacao = formatter.from_chain_message(&rendered.message).unwrap();
//! assert!(!cacao.is_signed());
//! ```
//!
//! [`Cacao`]: cacao_core::Cacao

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod factory;
pub mod formatter;
pub mod message;
pub mod nonce;
pub mod registry;

mod error;

pub use error::{SiwxError, SiwxResult};
pub use factory::CapabilityFactory;
pub use formatter::{ChainIdLine, MessageFormatter, Rendered};
pub use message::SiwxMessage;
pub use nonce::generate_nonce;
pub use registry::FormatterRegistry;
