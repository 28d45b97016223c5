//! # AppEvents Domain
//!
//! Domain types for the AppEvents client.
//!
//! This crate contains:
//! - Client configuration ([`ClientConfig`])
//! - The closed set of payload encodings ([`ContentType`])
//! - The structured error body returned by the event API ([`PostError`])
//! - Signing protocol constants
//!
//! ## Architecture
//! - No dependencies on other AppEvents crates
//! - No I/O; transport, signing and encoding live in `appevents-infra`

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
