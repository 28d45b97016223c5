//! HMAC-SHA1 query signing
//!
//! For every secure request the signer:
//! 1. Sets `ts`, `signNonce`, `signMethod` and `signVer`
//! 2. Builds the canonical string `<escaped app id>&POST&<encoded query>`
//! 3. Sets `sign` to Base64(HMAC-SHA1(app secret, canonical string))
//!
//! The receiving API recomputes the same string, so nothing here may change
//! without a matching server change.

use std::fmt;
use std::sync::Arc;

use appevents_domain::constants::{
    QUERY_NONCE, QUERY_SIGNATURE, QUERY_SIGN_METHOD, QUERY_SIGN_VERSION, QUERY_TIMESTAMP, REDACTED,
    SIGNED_HTTP_METHOD, SIGN_METHOD_HMAC_SHA1, SIGN_VERSION,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use super::clock::{Clock, SystemClock};
use super::nonce::{NonceSource, UuidNonceSource};
use super::query::{escape, QueryParams};

type HmacSha1 = Hmac<Sha1>;

/// Computes signed query parameters for one application.
///
/// Holds no per-request state; one signer can serve any number of threads.
#[derive(Clone)]
pub struct QuerySigner {
    app_id: String,
    app_secret: String,
    clock: Arc<dyn Clock>,
    nonces: Arc<dyn NonceSource>,
}

impl QuerySigner {
    /// Signer backed by the system clock and random UUID nonces.
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            clock: Arc::new(SystemClock),
            nonces: Arc::new(UuidNonceSource),
        }
    }

    /// Replace the timestamp source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the nonce generator.
    #[must_use]
    pub fn with_nonce_source(mut self, nonces: Arc<dyn NonceSource>) -> Self {
        self.nonces = nonces;
        self
    }

    /// Application identifier bound into every canonical string.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Add a fresh signature to `existing`.
    ///
    /// Keys already present are kept and take part in the canonical string;
    /// the five signing keys are overwritten.
    pub fn signed_query(&self, existing: QueryParams) -> QueryParams {
        let mut params = existing;
        params.set(QUERY_TIMESTAMP, self.clock.rfc3339());
        params.set(QUERY_NONCE, self.nonces.next_nonce());
        params.set(QUERY_SIGN_METHOD, SIGN_METHOD_HMAC_SHA1);
        params.set(QUERY_SIGN_VERSION, SIGN_VERSION);

        let plain = self.canonical_string(&params);
        params.set(QUERY_SIGNATURE, self.sign(&plain));

        params
    }

    /// The string the HMAC is computed over.
    pub fn canonical_string(&self, params: &QueryParams) -> String {
        format!("{}&{}&{}", escape(&self.app_id), SIGNED_HTTP_METHOD, params.encode())
    }

    /// Base64 (standard alphabet, padded) HMAC-SHA1 of `plain`.
    pub fn sign(&self, plain: &str) -> String {
        // HMAC pads or hashes the key, so every length is accepted.
        let mut mac = HmacSha1::new_from_slice(self.app_secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(plain.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for QuerySigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuerySigner")
            .field("app_id", &self.app_id)
            .field("app_secret", &REDACTED)
            .finish_non_exhaustive()
    }
}
