//! Request signing for secure event posts
//!
//! - [`QuerySigner`]: keyed-MAC (HMAC-SHA1) over app id, method and query
//! - [`QueryParams`]: key-sorted parameter set with deterministic encoding
//! - [`Clock`] / [`NonceSource`]: injectable time and randomness so a
//!   signature can be reproduced in tests

mod clock;
mod nonce;
mod query;
mod signer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use nonce::{FixedNonceSource, NonceSource, UuidNonceSource};
pub use query::{escape, QueryParams};
pub use signer::QuerySigner;
