use std::time::Duration;

use reqwest::blocking::{Client as ReqwestClient, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::debug;
use url::Url;

use crate::errors::EventError;

/// Blocking HTTP transport used by the event client.
///
/// Issues exactly one request per call: no retries, no backoff. Deadlines
/// come from the underlying reqwest client, so build it with a timeout.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, EventError> {
        Self::builder().build()
    }

    /// Wrap a caller-configured reqwest client as-is.
    pub fn from_reqwest(client: ReqwestClient) -> Self {
        Self { client }
    }

    /// POST `body` to `url` with the given `Content-Type`.
    ///
    /// Any status code is returned as `Ok`; only failures to obtain a
    /// response (connect, DNS, timeout, ...) are errors.
    pub fn post(
        &self,
        url: Url,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> Result<Response, reqwest::Error> {
        debug!(path = url.path(), content_type, bytes = body.len(), "sending HTTP request");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(content_type))
            .body(body)
            .send();

        match &response {
            Ok(resp) => debug!(status = %resp.status(), "received HTTP response"),
            Err(err) => debug!(error = %err, "HTTP request failed"),
        }

        response
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: None,
            user_agent: None,
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    /// Total deadline for one request, including reading the response.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Deadline for establishing the TCP/TLS connection alone.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// `User-Agent` header sent with every request.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Extra headers sent with every request.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Config`] if the TLS backend cannot be initialised.
    pub fn build(self) -> Result<HttpClient, EventError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder
            .build()
            .map_err(|err| EventError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(HttpClient { client })
    }
}
