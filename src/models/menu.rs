//! Menu / MenuItem — partner-store structured pricing, plus the synthetic
//! catch-all menu used to keep `OrderItem.menu_item_id` NOT NULL (spec §4.4).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Menu {
    pub id: i64,
    pub store_id: i64,
    pub version: i32,
    pub effective_date: DateTime<Utc>,
    /// The synthetic catch-all menu used for OCR/ad-hoc items has no human-authored version.
    pub is_catch_all: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MenuItem {
    pub id: i64,
    pub menu_id: i64,
    pub name_zh: String,
    pub price_small: i64,
    pub price_large: Option<i64>,
}

impl MenuItem {
    /// `GET /menu/{store_id}` excludes non-priced rows (spec §6).
    pub fn is_orderable(&self) -> bool {
        self.price_small > 0
    }
}
