//! Prelude module - commonly used types for convenient import.
//!
//! Use `use cacao_siwx::prelude::*;` to import all essential types.

// Errors
pub use crate::{SiwxError, SiwxResult};

// Messages
pub use crate::{ChainIdLine, MessageFormatter, Rendered, SiwxMessage};

// Packaging
pub use crate::{CapabilityFactory, FormatterRegistry};
