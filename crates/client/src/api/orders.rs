//! Order endpoints: buyer checkout/history plus the admin console.

use serde::Serialize;

use orchard_core::{
    CleanupResult, Order, OrderId, OrderPage, OrderStats, OrderStatus, ShippingAddress,
};

use super::ApiClient;
use crate::error::ApiError;

/// Body of `POST /orders`: the checkout submission. Line items come from
/// the server-side cart, not from the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub shipping_address: ShippingAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

#[derive(Serialize)]
struct StatusBody {
    status: OrderStatus,
}

impl ApiClient {
    /// Place an order from the current cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        self.post_json("/orders", order).await
    }

    /// The current user's order history.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_json("/orders/my-orders").await
    }

    /// Fetch a single order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the order is unknown.
    pub async fn order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.get_json(&format!("/orders/{id}")).await
    }

    /// Paginated order listing (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn orders(
        &self,
        status: Option<OrderStatus>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<OrderPage, ApiError> {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(status) = status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(page) = page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = limit {
            pairs.push(("limit", limit.to_string()));
        }
        self.get_query("/orders", &pairs).await
    }

    /// Request a status transition (admin). The server enforces the state
    /// machine; an illegal transition comes back as an API error whose
    /// message is surfaced verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the transition is rejected.
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.patch_json(&format!("/orders/{id}/status"), &StatusBody { status })
            .await
    }

    /// Cancel one of the current buyer's own orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the order is not pending.
    pub async fn cancel_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.patch_empty(&format!("/orders/{id}/cancel")).await
    }

    /// Cancel any non-finished order (admin override).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn admin_cancel_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.patch_empty(&format!("/orders/{id}/admin-cancel")).await
    }

    /// Purge old finished orders (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn cleanup_orders(&self) -> Result<CleanupResult, ApiError> {
        self.delete_json("/orders/cleanup").await
    }

    /// Dashboard aggregates (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn order_stats(&self) -> Result<OrderStats, ApiError> {
        self.get_json("/orders/stats/overview").await
    }
}
