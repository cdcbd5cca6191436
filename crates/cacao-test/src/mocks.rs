//! Mock implementations for testing.

use std::sync::{Arc, Mutex};

use cacao_verify::SchemeVerifier;

/// One recorded call to [`MockSchemeVerifier::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCall {
    /// Address the signature was checked against.
    pub address: String,
    /// The signed message, as text.
    pub message: String,
    /// The signature value.
    pub signature: String,
}

/// Scheme verifier with a fixed verdict that records every call.
///
/// Clones share the call log, so a clone can be registered with an engine
/// while the test keeps the original for assertions.
#[derive(Debug, Clone)]
pub struct MockSchemeVerifier {
    scheme: String,
    accept: bool,
    calls: Arc<Mutex<Vec<VerifyCall>>>,
}

impl MockSchemeVerifier {
    /// Create a mock for `scheme` that accepts every signature.
    #[must_use]
    pub fn accepting(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            accept: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock for `scheme` that rejects every signature.
    #[must_use]
    pub fn rejecting(scheme: impl Into<String>) -> Self {
        Self {
            accept: false,
            ..Self::accepting(scheme)
        }
    }

    /// Recorded calls, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<VerifyCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.calls.lock() {
            guard.clear();
        }
    }
}

impl SchemeVerifier for MockSchemeVerifier {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn verify(&self, address: &str, message: &[u8], signature: &str) -> bool {
        if let Ok(mut guard) = self.calls.lock() {
            guard.push(VerifyCall {
                address: address.to_string(),
                message: String::from_utf8_lossy(message).into_owned(),
                signature: signature.to_string(),
            });
        }
        self.accept
    }
}
