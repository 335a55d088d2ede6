//! OrderSummary rows (C9). Insert-only, uniquely indexed on `order_id`.

use sqlx::PgPool;

use crate::error::ServiceResult;
use crate::models::OrderSummary;

/// Writes the rendered summary inside the caller's transaction so it is
/// linearised with the `processing -> completed` transition (spec §5).
#[allow(clippy::too_many_arguments)]
pub async fn insert(
    tx: &mut sqlx::PgConnection,
    order_id: i64,
    chinese_summary: &str,
    user_language_summary: &str,
    user_language: &str,
    total_amount: i64,
    voice_url: Option<&str>,
) -> ServiceResult<OrderSummary> {
    let row = sqlx::query_as::<_, OrderSummary>(
        r#"
        INSERT INTO order_summaries (order_id, chinese_summary, user_language_summary, user_language, total_amount, voice_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING order_id, chinese_summary, user_language_summary, user_language, total_amount, voice_url
        "#,
    )
    .bind(order_id)
    .bind(chinese_summary)
    .bind(user_language_summary)
    .bind(user_language)
    .bind(total_amount)
    .bind(voice_url)
    .fetch_one(&mut *tx)
    .await?;
    Ok(row)
}

pub async fn find_by_order(pool: &PgPool, order_id: i64) -> ServiceResult<Option<OrderSummary>> {
    let row = sqlx::query_as::<_, OrderSummary>(
        "SELECT order_id, chinese_summary, user_language_summary, user_language, total_amount, voice_url
         FROM order_summaries WHERE order_id = $1",
    )
    .bind(order_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
