//! Configuration loader
//!
//! Loads the event client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `APPEVENTS_URL`: Base URL of the event API
//! - `APPEVENTS_APP_ID`: Application identifier
//! - `APPEVENTS_APP_SECRET`: Shared signing secret
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./appevents.json` or `./appevents.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use appevents_domain::ClientConfig;

use crate::errors::EventError;

/// Base URL of the event API.
pub const ENV_URL: &str = "APPEVENTS_URL";
/// Application identifier.
pub const ENV_APP_ID: &str = "APPEVENTS_APP_ID";
/// Shared signing secret.
pub const ENV_APP_SECRET: &str = "APPEVENTS_APP_SECRET";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["appevents.json", "appevents.toml", "config.json", "config.toml"];

type Result<T> = std::result::Result<T, EventError>;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `EventError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `EventError::Config` naming the first missing variable.
pub fn load_from_env() -> Result<ClientConfig> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup
///
/// `lookup` is called with each variable name listed in the module docs.
///
/// # Errors
/// Returns `EventError::Config` naming the first missing variable.
pub fn load_from_lookup<F>(lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| {
        lookup(key).ok_or_else(|| {
            EventError::Config(format!("Missing required environment variable: {key}"))
        })
    };

    Ok(ClientConfig {
        base_url: required(ENV_URL)?,
        app_id: required(ENV_APP_ID)?,
        app_secret: required(ENV_APP_SECRET)?,
    })
}

/// Read the event client settings from a JSON or TOML file
///
/// With `Some(path)` that file must exist. With `None` the first of
/// `appevents.{json,toml}` / `config.{json,toml}` found in the working
/// directory or next to the executable is used. The file must provide
/// `base_url`, `app_id` and `app_secret`; the URL itself is only checked when
/// the client is built.
///
/// # Errors
/// Returns `EventError::Config` when no file can be located or read, or when
/// its contents do not describe a `ClientConfig`.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = resolve_config_path(path)?;
    tracing::info!(path = %config_path.display(), "Loading event client settings");

    let contents = std::fs::read_to_string(&config_path).map_err(|e| {
        EventError::Config(format!("Failed to read config file {}: {e}", config_path.display()))
    })?;

    parse_config(&contents, &config_path)
}

fn resolve_config_path(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(p) if p.exists() => Ok(p),
        Some(p) => Err(EventError::Config(format!("Config file not found: {}", p.display()))),
        None => probe_config_paths().ok_or_else(|| {
            EventError::Config(format!(
                "No config file found; set {ENV_URL}, {ENV_APP_ID} and {ENV_APP_SECRET} or \
                 create one of {}",
                CONFIG_FILE_NAMES.join(", ")
            ))
        }),
    }
}

/// Decode `contents` as a `ClientConfig`; `.toml` files are TOML, `.json`
/// files and files without an extension are JSON.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(contents)
            .map_err(|e| EventError::Config(format!("Invalid TOML format: {e}"))),
        Some("json") | None => serde_json::from_str(contents)
            .map_err(|e| EventError::Config(format!("Invalid JSON format: {e}"))),
        Some(other) => Err(EventError::Config(format!("Unsupported config format: {other}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    first_existing(&dirs)
}

fn first_existing(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}
