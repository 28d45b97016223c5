//! Time abstraction for request timestamps
//!
//! The signer reads the wall clock once per request. Production code uses
//! [`SystemClock`]; tests pin the timestamp with [`FixedClock`] so signatures
//! are reproducible.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current UTC time
pub trait Clock: Send + Sync {
    /// Current wall clock time
    fn now(&self) -> DateTime<Utc>;

    /// Current time as RFC 3339 with second precision and a `Z` suffix,
    /// e.g. `2023-01-01T00:00:00Z`.
    fn rfc3339(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Real system clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Implement Clock for Arc<T> where T: Clock for convenient sharing
impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
