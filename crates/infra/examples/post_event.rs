//! Example: Posting a signed event
//!
//! Loads the client configuration (environment first, then `appevents.toml`
//! / `appevents.json`) and posts one notification event.
//!
//! # Setup
//!
//! ```bash
//! export APPEVENTS_URL=https://api.example.com/a/app-1/v1/events
//! export APPEVENTS_APP_ID=app-1
//! export APPEVENTS_APP_SECRET=...
//! RUST_LOG=appevents_infra=debug cargo run --example post_event -- notify ops@example.com
//! ```
//!
//! Pass `--insecure` as the last argument to skip signing, or `--xml` to
//! send the body as XML.

use anyhow::Context;
use appevents_infra::{config, EventClient, EventError};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Notification {
    to: String,
    content: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let name = args.first().map(String::as_str).unwrap_or("notify");
    let to = args.get(1).cloned().unwrap_or_else(|| "ops@example.com".to_string());
    let insecure = args.iter().any(|arg| arg == "--insecure");
    let content_type = if args.iter().any(|arg| arg == "--xml") {
        "application/xml"
    } else {
        "application/json"
    };

    let config = config::load().context("failed to load client configuration")?;
    let client = EventClient::new(config).context("failed to build event client")?;

    let event = Notification { to, content: "Hello from appevents".to_string() };
    let result = if insecure {
        client.post_insecure_event(name, &event, content_type)
    } else {
        client.post_event(name, &event, content_type)
    };

    match result {
        Ok(()) => {
            println!("posted event {name:?} to {}", client.base_url());
            Ok(())
        }
        Err(EventError::Api(err)) => {
            anyhow::bail!("API rejected event (code {}): {}", err.code, err.message())
        }
        Err(err) if err.is_retryable() => {
            Err(err).context("transient failure, safe to retry")
        }
        Err(err) => Err(err.into()),
    }
}
