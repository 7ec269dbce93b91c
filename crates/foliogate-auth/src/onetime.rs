//! One-shot tokens for password-reset and email-verification flows.
//!
//! The raw value is the only copy ever handed to the end user; only its
//! SHA-256 digest is persisted, mirroring password storage discipline so
//! a store compromise does not leak usable tokens.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes in a raw token.
const TOKEN_BYTES: usize = 32;

/// A freshly generated one-shot token.
#[derive(Debug, Clone)]
pub struct OneTimeToken {
    /// The raw value, returned to the caller exactly once.
    pub raw: String,
    /// SHA-256 digest of the raw value, the only form that is stored.
    pub digest: String,
}

/// Generates a cryptographically random one-shot token and its digest.
pub fn generate() -> OneTimeToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);

    let raw = URL_SAFE_NO_PAD.encode(bytes);
    let digest = digest_of(&raw);
    OneTimeToken { raw, digest }
}

/// Re-derives the stored digest from a client-submitted raw token.
///
/// Comparison is always by digest equality, never by raw value.
pub fn digest_of(raw: &str) -> String {
    let hash = Sha256::digest(raw.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}
