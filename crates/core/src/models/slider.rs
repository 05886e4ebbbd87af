//! Promotional slider snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::SliderId;

/// A home-page promotional slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slider {
    #[serde(rename = "_id")]
    pub id: SliderId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Absolute URL or bare filename under the sliders uploads base path.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(default)]
    pub button_link: String,
    pub active: bool,
    /// Display position; lower comes first.
    pub order: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
