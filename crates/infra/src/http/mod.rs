//! Blocking HTTP transport
//!
//! Thin wrapper over `reqwest::blocking` so the event client never builds
//! requests by hand and callers can supply their own configured transport.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
