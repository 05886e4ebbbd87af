//! Product endpoints: public browsing plus admin CRUD.

use reqwest::Method;
use reqwest::multipart;
use rust_decimal::Decimal;

use orchard_core::{Product, ProductId};

use super::{ApiClient, ImageFile};
use crate::error::ApiError;

/// Server-side product list filters (`GET /products?...`).
///
/// A category of `"all"` is the UI's "no filter" sentinel and is omitted
/// from the query string.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub featured: bool,
    pub search: Option<String>,
}

impl ProductQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category
            && category != "all"
        {
            pairs.push(("category", category.clone()));
        }
        if self.featured {
            pairs.push(("featured", "true".to_owned()));
        }
        if let Some(search) = &self.search
            && !search.is_empty()
        {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// Fields for creating or updating a product (multipart, admin only).
#[derive(Debug, Clone)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub stock: u32,
    pub featured: bool,
    /// Omitted on update to keep the existing image.
    pub image: Option<ImageFile>,
}

impl ProductForm {
    fn into_form(self) -> Result<multipart::Form, ApiError> {
        let mut form = multipart::Form::new()
            .text("name", self.name)
            .text("description", self.description)
            .text("price", self.price.to_string())
            .text("category", self.category)
            .text("stock", self.stock.to_string())
            .text("featured", self.featured.to_string());
        if let Some(image) = self.image {
            form = form.part("image", image.into_part()?);
        }
        Ok(form)
    }
}

impl ApiClient {
    /// List products, optionally filtered server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        self.get_query("/products", &query.to_pairs()).await
    }

    /// The featured selection (`GET /products/featured`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn featured_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("/products/featured").await
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the product is unknown.
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.get_json(&format!("/products/{id}")).await
    }

    /// Create a product (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_product(&self, form: ProductForm) -> Result<Product, ApiError> {
        self.send_multipart(Method::POST, "/products", form.into_form()?)
            .await
    }

    /// Update a product (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn update_product(
        &self,
        id: &ProductId,
        form: ProductForm,
    ) -> Result<Product, ApiError> {
        self.send_multipart(Method::PUT, &format!("/products/{id}"), form.into_form()?)
            .await
    }

    /// Delete a product (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.delete_unit(&format!("/products/{id}")).await
    }
}
