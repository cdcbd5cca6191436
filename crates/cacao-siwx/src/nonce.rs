//! Nonce generation and validation.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of generated nonces.
pub const NONCE_LEN: usize = 17;

/// Shortest nonce accepted in a message.
pub const MIN_NONCE_LEN: usize = 8;

/// Generate a random alphanumeric nonce.
#[must_use]
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// Whether `nonce` is at least [`MIN_NONCE_LEN`] ASCII alphanumerics.
#[must_use]
pub fn is_valid_nonce(nonce: &str) -> bool {
    nonce.len() >= MIN_NONCE_LEN && nonce.chars().all(|c| c.is_ascii_alphanumeric())
}
