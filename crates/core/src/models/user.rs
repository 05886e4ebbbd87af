//! User account snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Role, UserId};

/// An account as reported by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether this account should see the elevated admin views.
    ///
    /// Pure projection of the role, not a separate source of truth.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
