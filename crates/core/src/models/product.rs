//! Product and category snapshots.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ProductId};

/// A product as listed by the remote API.
///
/// `stock` is authoritative server-side; the value here is a snapshot and
/// may be stale by the time a cart mutation is attempted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Absolute URL or a bare filename under the uploads base path.
    #[serde(default)]
    pub image: String,
    /// Category *name*, not identifier. Grouping keys off this string.
    pub category: String,
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether the snapshotted stock still allows adding `quantity` more.
    ///
    /// Display-side guard only; the server is the one that actually
    /// rejects an over-quantity update.
    #[must_use]
    pub const fn in_stock(&self, quantity: u32) -> bool {
        quantity <= self.stock
    }
}

/// A product category. Flat, unordered set; matched by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
