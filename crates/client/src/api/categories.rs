//! Category endpoints. Reads are public; writes are admin-only.

use serde::Serialize;

use orchard_core::{Category, CategoryId};

use super::ApiClient;
use crate::error::ApiError;

#[derive(Serialize)]
struct CategoryBody<'a> {
    name: &'a str,
    description: &'a str,
}

impl ApiClient {
    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json("/categories").await
    }

    /// Fetch a single category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the category is unknown.
    pub async fn category(&self, id: &CategoryId) -> Result<Category, ApiError> {
        self.get_json(&format!("/categories/{id}")).await
    }

    /// Create a category (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_category(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Category, ApiError> {
        self.post_json("/categories", &CategoryBody { name, description })
            .await
    }

    /// Update a category (admin).
    ///
    /// Renaming a category silently orphans products still carrying the
    /// old name into the catch-all bucket; the server does not cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn update_category(
        &self,
        id: &CategoryId,
        name: &str,
        description: &str,
    ) -> Result<Category, ApiError> {
        self.put_json(
            &format!("/categories/{id}"),
            &CategoryBody { name, description },
        )
        .await
    }

    /// Delete a category (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), ApiError> {
        self.delete_unit(&format!("/categories/{id}")).await
    }
}
