//! Orchard storefront API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP with `reqwest`; the remote API is the single
//!   source of truth and there is no local sync or cache layer.
//! - A bearer token, once obtained, is attached to every request from a
//!   process-wide slot.
//! - Non-success responses are parsed for a `{ "message": ... }` body;
//!   an unparsable body falls back to a generic message.
//! - No retries, no request cancellation, no timeout policy beyond the
//!   transport's defaults. Every operation fails fast.
//!
//! # Example
//!
//! ```rust,ignore
//! use orchard_client::{ApiClient, ClientConfig};
//!
//! let config = ClientConfig::from_env()?;
//! let client = ApiClient::new(&config);
//!
//! // Browse without authenticating
//! let products = client.products(&ProductQuery::default()).await?;
//!
//! // Authenticate, then mutate the cart
//! client.login("farida", "hunter2").await?;
//! let cart = client.add_to_cart(&products[0].id, 1).await?;
//! ```

mod auth;
mod cart;
mod categories;
mod chat;
mod orders;
mod products;
mod sliders;
mod users;

pub use auth::AuthResponse;
pub use chat::{GuestMessage, NewMessage};
pub use orders::NewOrder;
pub use products::{ProductForm, ProductQuery};
pub use sliders::SliderForm;

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::multipart;
use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::assets::{AssetKind, resolve_image};
use crate::config::ClientConfig;
use crate::error::{ApiError, GENERIC_ERROR_MESSAGE};

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the Orchard storefront/admin API.
///
/// Cheap to clone; clones share the HTTP pool and the token slot.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    /// API base with no trailing slash, e.g. `http://localhost:5000/api`.
    api_base: String,
    asset_base: Url,
    /// Written by login/signup (set) and logout/failed session check
    /// (clear); read by every outgoing request.
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                api_base: config.api_url.as_str().trim_end_matches('/').to_owned(),
                asset_base: config.asset_url.clone(),
                token: RwLock::new(None),
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Token slot
    // ─────────────────────────────────────────────────────────────────────

    /// Install a bearer token; attached to every subsequent request.
    pub fn install_token(&self, token: SecretString) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Drop the bearer token; subsequent requests go out anonymous.
    pub fn clear_token(&self) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a bearer token is currently installed.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Assets
    // ─────────────────────────────────────────────────────────────────────

    /// Resolve a product image reference to a displayable URL.
    #[must_use]
    pub fn product_image_url(&self, image: &str) -> Option<String> {
        resolve_image(&self.inner.asset_base, AssetKind::Product, image)
    }

    /// Resolve a slider image reference to a displayable URL.
    #[must_use]
    pub fn slider_image_url(&self, image: &str) -> Option<String> {
        resolve_image(&self.inner.asset_base, AssetKind::Slider, image)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Request plumbing
    // ─────────────────────────────────────────────────────────────────────

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.api_base)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.inner.http.request(method, self.endpoint(path));
        self.authorize(builder)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self
            .inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        match token.as_ref() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_unit(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::POST, path).send().await?;
        Self::expect_success(response).await
    }

    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PATCH, path).json(body).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::PATCH, path).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::expect_success(response).await
    }

    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: multipart::Form,
    ) -> Result<T, ApiError> {
        let response = self.request(method, path).multipart(form).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_for(response).await)
        }
    }

    async fn expect_success(response: Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(response).await)
        }
    }

    /// Build an [`ApiError::Api`] from a non-success response, pulling the
    /// human-readable message out of the body when there is one.
    async fn error_for(response: Response) -> ApiError {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }

        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body
                .message
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_owned()),
            Err(_) => GENERIC_ERROR_MESSAGE.to_owned(),
        };

        tracing::debug!(status = %status, message = %message, "API request failed");
        ApiError::Api { status, message }
    }
}

// =============================================================================
// Multipart uploads
// =============================================================================

/// An image sent as a multipart form field when creating or editing a
/// product or slider.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub(crate) fn into_part(self) -> Result<multipart::Part, ApiError> {
        Ok(multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)?)
    }
}
