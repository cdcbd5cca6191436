//! Cacao Core - Capability data model for chain-agnostic sign-in.
//!
//! A CACAO (chain-agnostic capability object) packages a wallet-signed
//! sign-in message into a structured, content-addressable value:
//! - [`Cacao`] with its [`Header`], [`Payload`] and [`Signature`]
//! - [`PkhDid`] issuer identifiers (`did:pkh:<namespace>:<reference>:<address>`)
//! - RFC 3339 timestamp helpers
//! - the [`BlockCodec`] boundary with the default [`DagCborCodec`]
//!
//! # Example
//!
//! ```
//! use cacao_core::{BlockCodec, Cacao, DagCborCodec, Header, Payload};
//!
//! let payload = Payload::new(
//!     "service.org",
//!     "did:pkh:eip155:1:0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
//!     "https://service.org/login",
//!     "1",
//!     "32891757",
//!     "2021-09-30T16:25:24.000Z",
//! );
//! let cacao = Cacao::new(Header::new("eip4361"), payload);
//!
//! let block = DagCborCodec::new().encode(&cacao).unwrap();
//! assert!(block.cid.to_string().starts_with("bafyrei"));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod block;
pub mod cacao;
pub mod did;
pub mod time;

mod error;

pub use block::{BlockCodec, CacaoBlock, DagCborCodec, content_id};
pub use cacao::{
    Cacao, HEADER_CAIP122, HEADER_EIP4361, Header, Payload, SCHEME_EIP191, SCHEME_SOLANA_ED25519,
    Signature,
};
pub use did::PkhDid;
pub use error::{CodecError, CodecResult, CoreError, CoreResult};
pub use time::{format_timestamp, now_timestamp, parse_timestamp};

pub use cid::Cid;
