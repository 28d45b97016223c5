//! Payload encodings accepted by the event API

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{MIME_JSON, MIME_XML};

/// Serialization format of an event body.
///
/// The set is closed: a MIME string that is not exactly `application/xml`
/// maps to [`ContentType::Json`]. Unknown types never fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Json,
    Xml,
}

impl ContentType {
    /// Resolve the encoding for a caller-supplied MIME string.
    ///
    /// The comparison is exact (no parameters, no case folding).
    // TODO: add a strict variant that rejects unrecognized types instead of
    // degrading to JSON.
    pub fn from_mime(mime: &str) -> Self {
        match mime {
            MIME_XML => Self::Xml,
            _ => Self::Json,
        }
    }

    /// The `Content-Type` header value sent with the request.
    pub const fn as_mime(self) -> &'static str {
        match self {
            Self::Json => MIME_JSON,
            Self::Xml => MIME_XML,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

impl From<&str> for ContentType {
    fn from(mime: &str) -> Self {
        Self::from_mime(mime)
    }
}
