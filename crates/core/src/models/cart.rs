//! Server-side cart snapshot and its derived totals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Product;
use crate::types::{CartId, UserId};

/// One line of a cart: a product snapshot, a quantity, and the unit price
/// captured at the moment the item was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
    pub price: Decimal,
}

impl CartItem {
    /// Line total: quantity x unit price.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }
}

/// The server-side cart, mirrored locally as a read-through cache.
///
/// Every mutation replaces this snapshot with the server's post-mutation
/// response; no local-only change survives a refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(rename = "_id")]
    pub id: CartId,
    pub user: UserId,
    pub items: Vec<CartItem>,
    pub total: Decimal,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Cart {
    /// Displayed item count: the sum of quantities across line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of line totals.
    ///
    /// The server's `total` is authoritative for display; this derivation
    /// exists for the views that show a per-line breakdown.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Response shape of `GET /cart/count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCount {
    pub count: u32,
}
