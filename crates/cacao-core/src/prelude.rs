//! Prelude module - commonly used types for convenient import.
//!
//! Use `use cacao_core::prelude::*;` to import all essential types.

// Errors
pub use crate::{CodecError, CodecResult, CoreError, CoreResult};

// Data model
pub use crate::{Cacao, Header, Payload, PkhDid, Signature};

// Encoding
pub use crate::{BlockCodec, CacaoBlock, Cid, DagCborCodec};
