//! Replay-protection nonces

use std::sync::Arc;

use uuid::Uuid;

/// Generator of single-use tokens for the `signNonce` parameter
pub trait NonceSource: Send + Sync {
    /// Return a token that has never been handed out before.
    fn next_nonce(&self) -> String;
}

/// Random version-4 UUIDs in lowercase hyphenated form
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidNonceSource;

impl NonceSource for UuidNonceSource {
    fn next_nonce(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Always returns the same token. Only useful for reproducing a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedNonceSource(pub String);

impl FixedNonceSource {
    /// Source that hands out `nonce` on every call.
    pub fn new(nonce: impl Into<String>) -> Self {
        Self(nonce.into())
    }
}

impl NonceSource for FixedNonceSource {
    fn next_nonce(&self) -> String {
        self.0.clone()
    }
}

impl<T: NonceSource + ?Sized> NonceSource for Arc<T> {
    fn next_nonce(&self) -> String {
        (**self).next_nonce()
    }
}
