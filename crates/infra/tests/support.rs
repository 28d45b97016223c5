use std::io;
use std::sync::{Arc, Mutex};

use appevents_domain::ClientConfig;
use appevents_infra::{EventClient, FixedClock, FixedNonceSource, QueryParams, QuerySigner};
use chrono::{TimeZone, Utc};
use tokio::runtime::Runtime;
use tracing_subscriber::fmt::MakeWriter;
use wiremock::{Mock, MockServer, Request};

pub const APP_ID: &str = "app-123";
pub const APP_SECRET: &str = "s3cret";
pub const FIXED_NONCE: &str = "00000000-0000-4000-8000-000000000000";
pub const FIXED_TS: &str = "2023-01-01T00:00:00Z";

/// WireMock server hosted on its own runtime so blocking clients can be
/// driven from the test thread.
///
/// Field order matters: the server must drop before its runtime.
pub struct TestServer {
    pub mock: MockServer,
    rt: Runtime,
}

impl TestServer {
    pub fn start() -> Self {
        let rt = Runtime::new().expect("tokio runtime should start");
        let mock = rt.block_on(MockServer::start());
        Self { mock, rt }
    }

    pub fn uri(&self) -> String {
        self.mock.uri()
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.mock));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.rt
            .block_on(self.mock.received_requests())
            .expect("request recording should be enabled")
    }

    pub fn verify(&self) {
        self.rt.block_on(self.mock.verify());
    }
}

pub fn config(base_url: impl Into<String>) -> ClientConfig {
    ClientConfig::new(base_url, APP_ID, APP_SECRET)
}

/// Client with the default clock and nonce source.
pub fn client(base_url: impl Into<String>) -> EventClient {
    EventClient::new(config(base_url)).expect("client should build")
}

/// Client whose signatures are reproducible: fixed `ts` and `signNonce`.
pub fn deterministic_client(base_url: impl Into<String>) -> EventClient {
    EventClient::builder(config(base_url))
        .clock(FixedClock(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()))
        .nonce_source(FixedNonceSource::new(FIXED_NONCE))
        .build()
        .expect("client should build")
}

pub fn query_of(request: &Request) -> QueryParams {
    QueryParams::from_query(request.url.query())
}

pub fn content_type_of(request: &Request) -> String {
    request
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Recompute the signature of a received request the way the API does.
pub fn expected_signature(request: &Request) -> String {
    let mut params = query_of(request);
    params.remove("sign");
    let signer = QuerySigner::new(APP_ID, APP_SECRET);
    signer.sign(&signer.canonical_string(&params))
}

/// In-memory sink for `tracing` output.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer poisoned")).into_owned()
    }
}

pub struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter(Arc::clone(&self.0))
    }
}

/// Run `f` with every `tracing` event at TRACE and above captured.
pub fn with_captured_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(logs.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}
