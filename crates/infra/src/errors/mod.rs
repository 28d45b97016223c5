//! Event client error types
//!
//! Every failure of construction or posting is returned to the caller as an
//! [`EventError`]. Nothing is retried or swallowed internally; the category
//! helpers only advise callers that run their own retry policy.

use appevents_domain::PostError;
use thiserror::Error;

/// Boxed cause of an encoding failure (serde_json or quick-xml).
pub type EncodeCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Categories of event client errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventErrorCategory {
    /// Malformed configuration - fatal to client creation
    Config,
    /// Caller passed an invalid argument - no request was sent
    Validation,
    /// Payload could not be serialized - no request was sent
    Encoding,
    /// Network/connection failure
    Transport,
    /// The API answered with status >= 400
    Api,
}

/// Event client errors
#[derive(Debug, Error)]
pub enum EventError {
    /// The base URL does not parse
    #[error("Parse URL error: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Unusable configuration: base URL without a host, unreadable config
    /// file, transport that cannot be built
    #[error("Configuration error: {0}")]
    Config(String),

    /// The event name was empty
    #[error("Missing event name")]
    EmptyName,

    /// The payload has no representation in the selected format
    #[error("Encode event error: {0}")]
    Encoding(#[source] EncodeCause),

    /// No HTTP response was received (connect, DNS, timeout, body read)
    #[error("Send request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Status >= 400 with a JSON error body
    #[error(transparent)]
    Api(#[from] PostError),

    /// Status >= 400 with a body that is not JSON
    #[error("API response error, status code: {status}, body: {body}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Raw body text, lossily decoded as UTF-8
        body: String,
    },
}

impl EventError {
    /// Get the error category for this error
    pub fn category(&self) -> EventErrorCategory {
        match self {
            Self::InvalidUrl(_) | Self::Config(_) => EventErrorCategory::Config,
            Self::EmptyName => EventErrorCategory::Validation,
            Self::Encoding(_) => EventErrorCategory::Encoding,
            Self::Transport(_) => EventErrorCategory::Transport,
            Self::Api(_) | Self::ApiResponse { .. } => EventErrorCategory::Api,
        }
    }

    /// HTTP status reported by the API, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status),
            Self::ApiResponse { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether a caller-side retry could succeed.
    ///
    /// Transport failures, rate limiting (429) and server errors (5xx) are
    /// retryable; everything else will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self.category() {
            EventErrorCategory::Transport => true,
            EventErrorCategory::Api => {
                matches!(self.status(), Some(status) if status == 429 || status >= 500)
            }
            EventErrorCategory::Config
            | EventErrorCategory::Validation
            | EventErrorCategory::Encoding => false,
        }
    }

    pub(crate) fn encoding<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Encoding(Box::new(err))
    }
}
