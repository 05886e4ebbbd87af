//! Integration tests for Orchard.
//!
//! Everything here talks to a live Orchard API server and is `#[ignore]`d
//! by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Point at a disposable server; the tests create users and orders
//! export ORCHARD_API_URL=http://localhost:5000/api
//!
//! cargo test -p orchard-integration-tests -- --ignored
//! ```
//!
//! Admin tests additionally need credentials for an existing admin
//! account in `ORCHARD_ADMIN_USERNAME` / `ORCHARD_ADMIN_PASSWORD`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use uuid::Uuid;

use orchard_client::api::{ApiClient, AuthResponse};
use orchard_client::config::ClientConfig;

/// A fresh client against `ORCHARD_API_URL`, with its own throwaway
/// state file.
#[must_use]
pub fn test_client() -> ApiClient {
    let mut config = ClientConfig::from_env().expect("invalid client configuration");
    config.state_file = temp_state_file();
    ApiClient::new(&config)
}

/// Path for a state file that no other test run shares.
#[must_use]
pub fn temp_state_file() -> PathBuf {
    std::env::temp_dir()
        .join("orchard-integration-tests")
        .join(format!("{}.json", Uuid::new_v4()))
}

/// A username that cannot collide across test runs.
#[must_use]
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Create a throwaway buyer account and leave the client logged in as it.
///
/// # Panics
///
/// Panics when the server rejects the signup; the suite cannot proceed
/// without an account.
pub async fn signup_buyer(client: &ApiClient) -> AuthResponse {
    let username = unique_username("buyer");
    client
        .signup(&username, &format!("{username}@example.com"), "hunter2!")
        .await
        .expect("signup failed")
}

/// Log the client in as the configured admin account, or `None` when the
/// environment provides no admin credentials.
pub async fn login_admin(client: &ApiClient) -> Option<AuthResponse> {
    let username = std::env::var("ORCHARD_ADMIN_USERNAME").ok()?;
    let password = std::env::var("ORCHARD_ADMIN_PASSWORD").ok()?;
    Some(
        client
            .login(&username, &password)
            .await
            .expect("admin login failed"),
    )
}
