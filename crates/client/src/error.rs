//! Unified error taxonomy for everything the client can fail at.
//!
//! All failures reduce to: a network failure, a non-success response with
//! a server-provided message, a parse failure, or a local validation
//! failure. Nothing is classified retry-able - every error surfaces once
//! and the triggering operation is not retried.

use reqwest::StatusCode;
use thiserror::Error;

/// Fallback when an error response body carries no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Errors that can occur when talking to the Orchard API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response; `message` comes from the response body when
    /// parsable, otherwise [`GENERIC_ERROR_MESSAGE`].
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
    },

    /// JSON handling failed outside of the transport layer.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A cart mutation was attempted without an authenticated identity.
    #[error("Please login to add items to cart")]
    NotAuthenticated,

    /// Local form validation failed; resolved without a network call.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// The HTTP status, when this error came from a server response.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_server_message() {
        let err = ApiError::Api {
            status: StatusCode::BAD_REQUEST,
            message: "Not enough stock".to_owned(),
        };
        assert_eq!(err.to_string(), "Not enough stock");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_not_authenticated_message() {
        assert_eq!(
            ApiError::NotAuthenticated.to_string(),
            "Please login to add items to cart"
        );
    }
}
