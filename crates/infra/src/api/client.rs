//! Event client
//!
//! Posts one named event per call to `<base URL>/<event name>`, optionally
//! signing the request query. Calls are blocking and independent: the
//! client holds no mutable state, so a single instance can be shared across
//! threads.

use std::io;
use std::sync::Arc;

use appevents_domain::{ClientConfig, ContentType, PostError};
use reqwest::blocking::Response;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::encoding::encode_payload;
use crate::errors::EventError;
use crate::http::HttpClient;
use crate::signing::{Clock, NonceSource, QueryParams, QuerySigner};

/// Client for the event API
#[derive(Clone, Debug)]
pub struct EventClient {
    base_url: Url,
    signer: QuerySigner,
    http_client: HttpClient,
}

impl EventClient {
    /// Create a client with the default transport, clock and nonce source.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidUrl`] if `base_url` does not parse, or
    /// [`EventError::Config`] if it has no host or the transport cannot be
    /// built.
    pub fn new(config: ClientConfig) -> Result<Self, EventError> {
        Self::builder(config).build()
    }

    /// Create a builder for injecting a transport, clock or nonce source
    pub fn builder(config: ClientConfig) -> EventClientBuilder {
        EventClientBuilder { config, http_client: None, clock: None, nonces: None }
    }

    /// The validated base URL every event name is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Post event `name` with a signed query.
    ///
    /// `content_type` selects the body encoding: exactly `application/xml`
    /// encodes XML, anything else encodes JSON and is sent as
    /// `application/json`.
    ///
    /// # Errors
    ///
    /// - [`EventError::EmptyName`] if `name` is empty (nothing is sent)
    /// - [`EventError::Encoding`] if `payload` cannot be serialized (nothing
    ///   is sent)
    /// - [`EventError::Transport`] if no response was received
    /// - [`EventError::Api`] / [`EventError::ApiResponse`] for status >= 400
    pub fn post_event<T>(&self, name: &str, payload: &T, content_type: &str) -> Result<(), EventError>
    where
        T: Serialize + ?Sized,
    {
        self.send_event(name, payload, content_type, true)
    }

    /// Post event `name` without signing.
    ///
    /// Same contract as [`EventClient::post_event`]; the query string is
    /// sent exactly as it appears on the base URL.
    pub fn post_insecure_event<T>(
        &self,
        name: &str,
        payload: &T,
        content_type: &str,
    ) -> Result<(), EventError>
    where
        T: Serialize + ?Sized,
    {
        self.send_event(name, payload, content_type, false)
    }

    /// Target URL for event `name`: the base path with `name` appended.
    ///
    /// Slashes in `name` separate segments. Empty segments are dropped, so
    /// the result never contains `//` whether or not the base path ends with
    /// a slash. Dot segments are dropped as well, never resolved.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::EmptyName`] if `name` is empty.
    pub fn event_url(&self, name: &str) -> Result<Url, EventError> {
        if name.is_empty() {
            return Err(EventError::EmptyName);
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| EventError::Config("base URL cannot carry path segments".into()))?
            .pop_if_empty()
            .extend(name.split('/').filter(|segment| !matches!(*segment, "" | "." | "..")));

        Ok(url)
    }

    #[instrument(skip(self, payload))]
    fn send_event<T>(
        &self,
        name: &str,
        payload: &T,
        content_type: &str,
        secure: bool,
    ) -> Result<(), EventError>
    where
        T: Serialize + ?Sized,
    {
        let mut url = self.event_url(name)?;

        let content_type = ContentType::from_mime(content_type);
        let body = encode_payload(content_type, payload)?;

        if secure {
            let signed = self.signer.signed_query(QueryParams::from_query(url.query()));
            url.set_query(Some(&signed.encode()));
        }

        debug!(path = url.path(), %content_type, bytes = body.len(), "posting event");

        let response = self.http_client.post(url, content_type.as_mime(), body)?;
        interpret_response(response)
    }
}

/// Builder for [`EventClient`]
pub struct EventClientBuilder {
    config: ClientConfig,
    http_client: Option<HttpClient>,
    clock: Option<Arc<dyn Clock>>,
    nonces: Option<Arc<dyn NonceSource>>,
}

impl EventClientBuilder {
    /// Use a preconfigured transport (e.g. with a custom timeout)
    pub fn http_client(mut self, http_client: HttpClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Set the source of the `ts` parameter
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Set the source of the `signNonce` parameter
    pub fn nonce_source(mut self, nonces: impl NonceSource + 'static) -> Self {
        self.nonces = Some(Arc::new(nonces));
        self
    }

    /// Build the event client
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the default transport
    /// cannot be created
    pub fn build(self) -> Result<EventClient, EventError> {
        let base_url = parse_base_url(&self.config.base_url)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => HttpClient::new()?,
        };

        let mut signer = QuerySigner::new(self.config.app_id, self.config.app_secret);
        if let Some(clock) = self.clock {
            signer = signer.with_clock(clock);
        }
        if let Some(nonces) = self.nonces {
            signer = signer.with_nonce_source(nonces);
        }

        debug!(base_url = %base_url, app_id = signer.app_id(), "event client created");

        Ok(EventClient { base_url, signer, http_client })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, EventError> {
    let url = Url::parse(raw)?;

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(EventError::Config(format!(
            "base URL must be absolute with a host: {raw}"
        )));
    }

    Ok(url)
}

/// Map the HTTP response to the call result. The body is consumed on every
/// path so the connection can be released.
fn interpret_response(mut response: Response) -> Result<(), EventError> {
    let status = response.status();

    if status.as_u16() < 400 {
        if let Err(err) = io::copy(&mut response, &mut io::sink()) {
            debug!(error = %err, "failed to drain response body");
        }
        return Ok(());
    }

    let body = response.bytes()?;
    let err = decode_error_body(status.as_u16(), &body);
    warn!(status = status.as_u16(), error = %err, "event API rejected request");
    Err(err)
}

/// Decode an error body.
///
/// Any well-formed JSON other than `null` yields [`EventError::Api`]: each
/// field that is present with the right type is taken, anything else
/// (missing, `null`, mistyped, or a body that is not an object) leaves
/// the zero value. Malformed JSON, an empty body and `null` keep the raw
/// text in [`EventError::ApiResponse`].
fn decode_error_body(status: u16, body: &[u8]) -> EventError {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) | Err(_) => {
            EventError::ApiResponse { status, body: String::from_utf8_lossy(body).into_owned() }
        }
        Ok(value) => EventError::Api(post_error_fields(&value).with_status(status)),
    }
}

fn post_error_fields(value: &Value) -> PostError {
    PostError {
        code: body_field(value, "code").and_then(Value::as_i64).unwrap_or_default(),
        err_msg: body_field(value, "err_msg").and_then(Value::as_str).unwrap_or_default().to_owned(),
        ..PostError::default()
    }
}

/// Object member `name`, preferring an exact key over a case-insensitive one.
fn body_field<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    let object = value.as_object()?;
    object.get(name).or_else(|| {
        object.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, field)| field)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EventErrorCategory;

    fn client(base_url: &str) -> EventClient {
        EventClient::new(ClientConfig::new(base_url, "app-1", "secret")).unwrap()
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<EventClient>();
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        let err = EventClient::new(ClientConfig::new("not a url", "a", "b")).unwrap_err();
        assert!(matches!(err, EventError::InvalidUrl(_)));
        assert!(err.to_string().starts_with("Parse URL error: "));
    }

    #[test]
    fn test_rejects_base_url_without_host() {
        for raw in ["mailto:ops@example.com", "file:///tmp/events"] {
            let err = EventClient::new(ClientConfig::new(raw, "a", "b")).unwrap_err();
            assert_eq!(err.category(), EventErrorCategory::Config, "url {raw}");
        }
    }

    #[test]
    fn test_accepts_empty_credentials() {
        let client = EventClient::new(ClientConfig::new("https://api.example.com", "", ""));
        assert!(client.is_ok());
    }

    #[test]
    fn test_event_url_joins_path() {
        for base in ["https://host/a/b", "https://host/a/b/"] {
            let url = client(base).event_url("foo").unwrap();
            assert_eq!(url.path(), "/a/b/foo", "base {base}");
        }
        assert_eq!(client("https://host").event_url("foo").unwrap().path(), "/foo");
        assert_eq!(client("https://host/").event_url("foo").unwrap().path(), "/foo");
    }

    #[test]
    fn test_event_url_keeps_base_query() {
        let url = client("https://host/v1/events?channel=email").event_url("signup").unwrap();
        assert_eq!(url.as_str(), "https://host/v1/events/signup?channel=email");
    }

    #[test]
    fn test_event_url_segments() {
        let client = client("https://host/v1/");
        assert_eq!(client.event_url("user/created").unwrap().path(), "/v1/user/created");
        assert_eq!(client.event_url("/user//created/").unwrap().path(), "/v1/user/created");
        assert_eq!(client.event_url("../admin").unwrap().path(), "/v1/admin");
        assert_eq!(client.event_url("a b?").unwrap().path(), "/v1/a%20b%3F");
    }

    #[test]
    fn test_event_url_rejects_empty_name() {
        assert!(matches!(client("https://host").event_url(""), Err(EventError::EmptyName)));
    }

    #[test]
    fn test_decode_structured_error() {
        let err = decode_error_body(400, br#"{"code": 42, "err_msg": "bad input"}"#);
        match err {
            EventError::Api(post) => {
                assert_eq!(post.status, 400);
                assert_eq!(post.code, 42);
                assert_eq!(post.err_msg, "bad input");
            }
            other => panic!("expected structured error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_object_without_known_fields() {
        let err = decode_error_body(403, br#"{"message": "forbidden"}"#);
        match err {
            EventError::Api(post) => assert_eq!(post, PostError { status: 403, ..Default::default() }),
            other => panic!("expected structured error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_malformed_body() {
        for body in [&b"not json"[..], b"", b"  ", b"null", br#"{"code": 1"#, b"{} trailing"] {
            match decode_error_body(500, body) {
                EventError::ApiResponse { status, body: text } => {
                    assert_eq!(status, 500);
                    assert_eq!(text.as_bytes(), body);
                }
                other => panic!("expected generic error for {body:?}, got {other:?}"),
            }
        }
    }

    fn decoded(status: u16, body: &[u8]) -> PostError {
        match decode_error_body(status, body) {
            EventError::Api(post) => post,
            other => panic!("expected structured error for {body:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_null_field_keeps_zero_value() {
        let post = decoded(400, br#"{"code": 5, "err_msg": null}"#);
        assert_eq!(post, PostError { status: 400, code: 5, err_msg: String::new() });
    }

    #[test]
    fn test_decode_mistyped_field_keeps_others() {
        let post = decoded(400, br#"{"code": "42", "err_msg": "bad input"}"#);
        assert_eq!(post, PostError { status: 400, code: 0, err_msg: "bad input".into() });

        let post = decoded(422, br#"{"code": 1.5, "err_msg": 7}"#);
        assert_eq!(post, PostError { status: 422, ..Default::default() });
    }

    #[test]
    fn test_decode_non_object_json_is_zero_valued() {
        for body in [&b"[1,2]"[..], b"5", br#""oops""#, b"true", b"{}"] {
            assert_eq!(
                decoded(503, body),
                PostError { status: 503, ..Default::default() },
                "body {body:?}"
            );
        }
    }

    #[test]
    fn test_decode_field_names_ignore_case() {
        let post = decoded(400, br#"{"Code": 9, "ERR_MSG": "shouting"}"#);
        assert_eq!(post.code, 9);
        assert_eq!(post.err_msg, "shouting");

        let post = decoded(400, br#"{"CODE": 1, "code": 2}"#);
        assert_eq!(post.code, 2);
    }

    #[test]
    fn test_decode_keeps_invalid_utf8_lossily() {
        match decode_error_body(502, &[0xff, b'o', b'k']) {
            EventError::ApiResponse { body, .. } => assert_eq!(body, "\u{fffd}ok"),
            other => panic!("expected generic error, got {other:?}"),
        }
    }
}
