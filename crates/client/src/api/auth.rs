//! Authentication endpoints.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use orchard_core::User;

use super::ApiClient;
use crate::error::ApiError;

/// Response of `POST /auth/login` and `POST /auth/signup`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: SecretString,
    pub user: User,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupBody<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Exchange credentials for a bearer token and identity.
    ///
    /// On success the returned token is also installed into the client's
    /// token slot, so subsequent requests go out authenticated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are
    /// rejected; the token slot is left untouched in that case.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .post_json("/auth/login", &LoginBody { username, password })
            .await?;
        self.install_token(response.token.clone());
        Ok(response)
    }

    /// Create a new account. Same token contract as [`Self::login`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the signup is rejected.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .post_json(
                "/auth/signup",
                &SignupBody {
                    username,
                    email,
                    password,
                },
            )
            .await?;
        self.install_token(response.token.clone());
        Ok(response)
    }

    /// Exchange the installed token for the current identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is no longer
    /// accepted.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        #[derive(Deserialize)]
        struct Response {
            user: User,
        }

        let response: Response = self.get_json("/auth/me").await?;
        Ok(response.user)
    }

    /// Notify the server of logout.
    ///
    /// The token slot is cleared unconditionally, even when the server
    /// call fails (fail-open on logout).
    ///
    /// # Errors
    ///
    /// Returns the server error, purely informational - local state is
    /// already anonymous by then.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.post_unit("/auth/logout").await;
        self.clear_token();
        result
    }
}
