//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ORCHARD_API_URL` - Base URL of the remote API (default:
//!   `http://localhost:5000/api`)
//! - `ORCHARD_ASSET_URL` - Base URL for uploaded images (default: the API
//!   URL with a trailing `/api` segment stripped)
//! - `ORCHARD_STATE_FILE` - Path of the local JSON state file holding the
//!   bearer token and wishlist (default: `$HOME/.orchard/state.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_STATE_FILE: &str = ".orchard/state.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for API requests (includes the `/api` prefix).
    pub api_url: Url,
    /// Base URL for resolving bare image filenames.
    pub asset_url: Url,
    /// Where the bearer token and wishlist are persisted.
    pub state_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a provided URL does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_url("ORCHARD_API_URL", &get_env_or_default("ORCHARD_API_URL", DEFAULT_API_URL))?;

        let asset_url = match get_optional_env("ORCHARD_ASSET_URL") {
            Some(raw) => parse_url("ORCHARD_ASSET_URL", &raw)?,
            None => derive_asset_url(&api_url),
        };

        let state_file = get_optional_env("ORCHARD_STATE_FILE").map_or_else(default_state_file, PathBuf::from);

        Ok(Self {
            api_url,
            asset_url,
            state_file,
        })
    }
}

/// Strip a trailing `/api` path segment to get the asset origin.
///
/// Uploaded images live next to the API (`/uploads/...`), not under it.
fn derive_asset_url(api_url: &Url) -> Url {
    let mut asset = api_url.clone();
    let trimmed = api_url.path().trim_end_matches('/');
    if let Some(stripped) = trimmed.strip_suffix("/api") {
        asset.set_path(stripped);
    }
    asset
}

fn default_state_file() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(DEFAULT_STATE_FILE),
        |home| PathBuf::from(home).join(DEFAULT_STATE_FILE),
    )
}

fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
