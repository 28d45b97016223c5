//! Error body reported by the event API

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error returned by the API for HTTP status >= 400.
///
/// Wire shape: `{"code": <int>, "err_msg": "<string>"}`. Missing fields
/// decode to zero values; `status` never comes from the body and is filled
/// from the HTTP response.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[error("Post event API response error: {code} - {err_msg} (HTTP {status})")]
pub struct PostError {
    /// HTTP status of the response
    #[serde(skip)]
    pub status: u16,
    /// API error code
    #[serde(default)]
    pub code: i64,
    /// API error message
    #[serde(default)]
    pub err_msg: String,
}

impl PostError {
    /// Attach the HTTP status the body arrived with.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// The API-supplied message.
    pub fn message(&self) -> &str {
        &self.err_msg
    }
}
