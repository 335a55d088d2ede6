//! Order / OrderItem / OrderSummary — the core pipeline's durable artefacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl OrderStatus {
    /// §4.8 `status()`: `processing` is true iff status ∈ {pending, processing}.
    pub fn is_processing(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }

    /// P6: once completed or failed, no further transition is legal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub store_id: i64,
    pub order_time: DateTime<Utc>,
    pub total_amount: i64,
    pub status: OrderStatus,
    /// The language resolved at submission time (spec §4.8 step 2), carried
    /// independently of `User.preferred_language` since a returning user may
    /// submit in a different language than last time (invariant 3).
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i32,
    pub subtotal: i64,
    pub original_name: String,
    pub translated_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderSummary {
    pub order_id: i64,
    pub chinese_summary: String,
    pub user_language_summary: String,
    pub user_language: String,
    pub total_amount: i64,
    /// GCS location of the synthesized voice clip, stamped at render time.
    pub voice_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_and_processing_count_as_in_flight() {
        assert!(OrderStatus::Pending.is_processing());
        assert!(OrderStatus::Processing.is_processing());
        assert!(!OrderStatus::Completed.is_processing());
        assert!(!OrderStatus::Failed.is_processing());
    }

    #[test]
    fn terminal_states_are_completed_and_failed() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
    }
}
