//! Protocol constants
//!
//! Values shared by the signer and the receiving API. Changing any of them
//! breaks signature verification on the server side.

// Signing protocol
/// Value of the `signMethod` parameter.
pub const SIGN_METHOD_HMAC_SHA1: &str = "HMAC-SHA1";
/// Value of the `signVer` parameter.
pub const SIGN_VERSION: &str = "v1.0";
/// HTTP method bound into the canonical signing string.
pub const SIGNED_HTTP_METHOD: &str = "POST";

// Signed query parameter names
/// RFC 3339 UTC timestamp of the request.
pub const QUERY_TIMESTAMP: &str = "ts";
/// Single-use random token.
pub const QUERY_NONCE: &str = "signNonce";
/// MAC algorithm name.
pub const QUERY_SIGN_METHOD: &str = "signMethod";
/// Signing scheme version.
pub const QUERY_SIGN_VERSION: &str = "signVer";
/// Base64 HMAC over the canonical string.
pub const QUERY_SIGNATURE: &str = "sign";

// Content types
/// `Content-Type` of JSON bodies, also the fallback.
pub const MIME_JSON: &str = "application/json";
/// `Content-Type` that selects XML bodies.
pub const MIME_XML: &str = "application/xml";

/// Placeholder printed instead of secrets in `Debug` output.
pub const REDACTED: &str = "***";
