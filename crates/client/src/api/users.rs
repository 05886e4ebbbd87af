//! User management endpoints (admin only).

use orchard_core::{User, UserId};

use super::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Every registered account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/users").await
    }

    /// Delete an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        self.delete_unit(&format!("/users/{id}")).await
    }
}
