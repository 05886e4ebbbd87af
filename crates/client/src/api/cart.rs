//! Cart endpoints. All require an authenticated buyer.
//!
//! Every mutation returns the full post-mutation cart; callers replace
//! their local snapshot wholesale with the response.

use serde::Serialize;

use orchard_core::{Cart, CartCount, ProductId};

use super::ApiClient;
use crate::error::ApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddItemBody<'a> {
    product_id: &'a ProductId,
    quantity: u32,
}

#[derive(Serialize)]
struct QuantityBody {
    quantity: u32,
}

impl ApiClient {
    /// Fetch the current user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn cart(&self) -> Result<Cart, ApiError> {
        self.get_json("/cart").await
    }

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// quantity (e.g. a stale stock snapshot let an over-quantity through).
    pub async fn add_to_cart(&self, product_id: &ProductId, quantity: u32) -> Result<Cart, ApiError> {
        self.post_json(
            "/cart/items",
            &AddItemBody {
                product_id,
                quantity,
            },
        )
        .await
    }

    /// Set the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn update_cart_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        self.put_json(
            &format!("/cart/items/{product_id}"),
            &QuantityBody { quantity },
        )
        .await
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn remove_from_cart(&self, product_id: &ProductId) -> Result<Cart, ApiError> {
        self.delete_json(&format!("/cart/items/{product_id}")).await
    }

    /// Empty the cart. Returns no cart body; callers reset locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn clear_cart(&self) -> Result<(), ApiError> {
        self.delete_unit("/cart/clear").await
    }

    /// Lightweight item count (`GET /cart/count`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn cart_count(&self) -> Result<CartCount, ApiError> {
        self.get_json("/cart/count").await
    }
}
