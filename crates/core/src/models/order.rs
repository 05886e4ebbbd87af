//! Order snapshots and admin aggregates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Product, User};
use crate::types::{OrderId, OrderStatus, PaymentStatus, ProductId, UserId};

/// An order owner: either a bare ID or a populated user document,
/// depending on which endpoint returned the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(UserId),
    Detailed(Box<User>),
}

impl UserRef {
    #[must_use]
    pub fn id(&self) -> &UserId {
        match self {
            Self::Id(id) => id,
            Self::Detailed(user) => &user.id,
        }
    }
}

/// A line item's product reference, populated or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Id(ProductId),
    Detailed(Box<Product>),
}

impl ProductRef {
    #[must_use]
    pub fn id(&self) -> &ProductId {
        match self {
            Self::Id(id) => id,
            Self::Detailed(product) => &product.id,
        }
    }
}

/// A line item frozen at order time: the `name` and `price` are snapshots,
/// immune to later product edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product: ProductRef,
    pub quantity: u32,
    pub price: Decimal,
    pub name: String,
}

/// Shipping destination collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub mobile: String,
}

/// An order as reported by the remote API.
///
/// Status transitions are server-enforced; the client only consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub user: UserRef,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of the admin order listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total_pages: u32,
    pub current_page: u32,
    pub total: u64,
}

/// Response shape of `GET /orders/stats/overview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: u64,
    pub pending_orders: u64,
    pub total_revenue: Decimal,
    pub recent_orders: Vec<Order>,
}

/// Response shape of `DELETE /orders/cleanup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResult {
    pub message: String,
    pub deleted_count: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ORDER_JSON: &str = r#"{
        "_id": "o1",
        "user": "u1",
        "items": [
            {"product": "p1", "quantity": 2, "price": 10, "name": "Ceramic Mug"}
        ],
        "total": 20,
        "status": "pending",
        "shippingAddress": {
            "fullName": "Farida K",
            "address": "12 Canal Road",
            "city": "Lahore",
            "postalCode": "54000",
            "country": "PK",
            "mobile": "03001234567"
        },
        "paymentStatus": "pending",
        "paymentMethod": "cod"
    }"#;

    #[test]
    fn test_decode_order_with_bare_refs() {
        let order: Order = serde_json::from_str(ORDER_JSON).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user.id().as_str(), "u1");
        let first = order.items.first().unwrap();
        assert_eq!(first.product.id().as_str(), "p1");
        assert_eq!(first.name, "Ceramic Mug");
    }

    #[test]
    fn test_decode_order_with_populated_user() {
        let json = ORDER_JSON.replace(
            "\"user\": \"u1\"",
            r#""user": {"_id": "u1", "username": "farida", "email": "f@example.com", "role": "buyer"}"#,
        );
        let order: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order.user.id().as_str(), "u1");
        assert!(matches!(order.user, UserRef::Detailed(_)));
    }

    #[test]
    fn test_decode_order_page() {
        let json = format!(
            r#"{{"orders": [{ORDER_JSON}], "totalPages": 3, "currentPage": 1, "total": 25}}"#
        );
        let page: OrderPage = serde_json::from_str(&json).unwrap();
        assert_eq!(page.orders.len(), 1);
        assert_eq!(page.total_pages, 3);
    }
}
