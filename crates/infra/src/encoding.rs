//! Payload serialization
//!
//! The body is always encoded into memory before any request is made, so an
//! unserializable payload never reaches the network.

use appevents_domain::ContentType;
use serde::Serialize;

use crate::errors::EventError;

/// Encode `payload` in the format selected by `content_type`.
///
/// XML uses quick-xml's serde serializer: the root element is named after
/// the payload type and each field becomes a child element. Maps and bare
/// scalars have no root name and are rejected.
///
/// # Errors
///
/// Returns [`EventError::Encoding`] wrapping the serializer error.
pub fn encode_payload<T>(content_type: ContentType, payload: &T) -> Result<Vec<u8>, EventError>
where
    T: Serialize + ?Sized,
{
    match content_type {
        ContentType::Json => serde_json::to_vec(payload).map_err(EventError::encoding),
        ContentType::Xml => quick_xml::se::to_string(payload)
            .map(String::into_bytes)
            .map_err(EventError::encoding),
    }
}
