//! Event API client
//!
//! Posts named events to the remote event-collection API.
//!
//! # Architecture
//!
//! - Blocking: one HTTP exchange per call, no background work
//! - Secure posts carry an HMAC-SHA1 signed query (see [`crate::signing`])
//! - No retries, batching or persistence; every failure is returned to the
//!   caller as an [`crate::errors::EventError`]

pub mod client;

pub use client::{EventClient, EventClientBuilder};
