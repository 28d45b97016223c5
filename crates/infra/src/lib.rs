//! # AppEvents Infrastructure
//!
//! Blocking client for posting named events to a remote event API.
//!
//! This crate contains:
//! - The event client ([`EventClient`])
//! - HMAC-SHA1 query signing with injectable clock and nonce source
//! - JSON/XML payload encoding
//! - The blocking HTTP transport
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Depends on `appevents-domain` for configuration and wire types
//! - Contains all "impure" code (network, clock, randomness, files)
//!
//! ## Example
//!
//! ```no_run
//! use appevents_domain::ClientConfig;
//! use appevents_infra::EventClient;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Notification {
//!     to: String,
//!     content: String,
//! }
//!
//! let client = EventClient::new(ClientConfig::new(
//!     "https://api.example.com/a/app-1/v1/events",
//!     "app-1",
//!     "app-secret",
//! ))?;
//!
//! let event = Notification { to: "ops@example.com".into(), content: "hello world".into() };
//! client.post_event("notify", &event, "application/json")?;
//! # Ok::<(), appevents_infra::EventError>(())
//! ```

pub mod api;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod http;
pub mod signing;

// Re-export commonly used items
pub use api::{EventClient, EventClientBuilder};
pub use errors::{EventError, EventErrorCategory};
pub use http::{HttpClient, HttpClientBuilder};
pub use signing::{
    Clock, FixedClock, FixedNonceSource, NonceSource, QueryParams, QuerySigner, SystemClock,
    UuidNonceSource,
};
