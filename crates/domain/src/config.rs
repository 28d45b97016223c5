//! Client configuration

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::REDACTED;

/// Connection settings for the event API.
///
/// Built once at startup and handed to the client, which validates
/// `base_url`. `app_id` and `app_secret` are not validated; empty values are
/// accepted and simply produce signatures the server will reject.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API node, e.g. `https://api.example.com/a/app-1/v1/events`
    pub base_url: String,
    /// Application identifier, bound into every signature
    pub app_id: String,
    /// Shared HMAC secret
    #[serde(skip_serializing)]
    pub app_secret: String,
}

impl ClientConfig {
    /// Bundle the three settings. Nothing is validated here.
    pub fn new(
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Self {
        Self { base_url: base_url.into(), app_id: app_id.into(), app_secret: app_secret.into() }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id)
            .field("app_secret", &REDACTED)
            .finish()
    }
}
