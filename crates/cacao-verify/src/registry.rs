//! Lookup of scheme verifiers by tag.

use std::collections::HashMap;
use std::sync::Arc;

use crate::scheme::{Eip191Verifier, SchemeVerifier, SolanaEd25519Verifier};

/// Registry of signature verifiers keyed by scheme tag.
#[derive(Clone)]
pub struct SchemeRegistry {
    verifiers: HashMap<String, Arc<dyn SchemeVerifier>>,
}

impl SchemeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            verifiers: HashMap::new(),
        }
    }

    /// Create a registry with the built-in verifiers registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(Eip191Verifier));
        registry.register(Arc::new(SolanaEd25519Verifier));
        registry
    }

    /// Register a verifier, replacing any previous one for its scheme.
    pub fn register(&mut self, verifier: Arc<dyn SchemeVerifier>) {
        self.verifiers
            .insert(verifier.scheme().to_string(), verifier);
    }

    /// Get the verifier of a scheme.
    #[must_use]
    pub fn get(&self, scheme: &str) -> Option<Arc<dyn SchemeVerifier>> {
        self.verifiers.get(scheme).cloned()
    }

    /// Registered scheme tags, sorted.
    #[must_use]
    pub fn schemes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.verifiers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SchemeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemeRegistry")
            .field("schemes", &self.schemes())
            .finish()
    }
}
