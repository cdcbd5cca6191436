//! Prelude module - commonly used types for convenient import.
//!
//! Use `use cacao_verify::prelude::*;` to import all essential types.

// Errors
pub use crate::{VerificationError, VerifyResult};

// Engine
pub use crate::{VerificationEngine, VerifyOptions};

// Schemes
pub use crate::{SchemeRegistry, SchemeVerifier};
