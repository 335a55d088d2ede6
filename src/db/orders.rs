//! Order / OrderItem rows (spec §4.4, §4.8).

use sqlx::PgPool;

use crate::error::{AppError, ServiceResult};
use crate::models::{Order, OrderItem, OrderStatus};

pub struct NewOrderItem {
    pub menu_item_id: i64,
    pub quantity: i32,
    pub subtotal: i64,
    pub original_name: String,
    pub translated_name: String,
}

/// Inserts a `pending` Order with its items and the computed total, within
/// the caller's transaction (spec §4.4) — the caller (order_writer) also
/// needs that transaction to create synthetic MenuItem rows beforehand.
pub async fn create_pending(
    tx: &mut sqlx::PgConnection,
    user_id: i64,
    store_id: i64,
    language: &str,
    items: Vec<NewOrderItem>,
) -> ServiceResult<(Order, Vec<OrderItem>)> {
    if items.is_empty() {
        return Err(AppError::invalid_request("cart has no items after normalisation").into());
    }

    let order = sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (user_id, store_id, order_time, total_amount, status, language)
        VALUES ($1, $2, now(), 0, 'pending', $3)
        RETURNING id, user_id, store_id, order_time, total_amount, status, language
        "#,
    )
    .bind(user_id)
    .bind(store_id)
    .bind(language)
    .fetch_one(&mut *tx)
    .await?;

    let mut rows = Vec::with_capacity(items.len());
    let mut total = 0i64;
    for item in &items {
        total += item.subtotal;
        let row = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (order_id, menu_item_id, quantity, subtotal, original_name, translated_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, order_id, menu_item_id, quantity, subtotal, original_name, translated_name
            "#,
        )
        .bind(order.id)
        .bind(item.menu_item_id)
        .bind(item.quantity)
        .bind(item.subtotal)
        .bind(&item.original_name)
        .bind(&item.translated_name)
        .fetch_one(&mut *tx)
        .await?;
        rows.push(row);
    }

    let order = sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders SET total_amount = $1 WHERE id = $2
        RETURNING id, user_id, store_id, order_time, total_amount, status, language
        "#,
    )
    .bind(total)
    .bind(order.id)
    .fetch_one(&mut *tx)
    .await?;

    Ok((order, rows))
}

pub async fn find_by_id(pool: &PgPool, order_id: i64) -> ServiceResult<Option<Order>> {
    let row = sqlx::query_as::<_, Order>(
        "SELECT id, user_id, store_id, order_time, total_amount, status, language FROM orders WHERE id = $1",
    )
    .bind(order_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn items_for_order(pool: &PgPool, order_id: i64) -> ServiceResult<Vec<OrderItem>> {
    let rows = sqlx::query_as::<_, OrderItem>(
        r#"
        SELECT id, order_id, menu_item_id, quantity, subtotal, original_name, translated_name
        FROM order_items WHERE order_id = $1 ORDER BY id
        "#,
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Compare-and-set `pending -> processing`. Returns `false` (no-op) if the
/// order was already processing or beyond — this is what makes
/// `process_task` idempotent (spec §4.8 step 1, P3).
pub async fn try_begin_processing(pool: &PgPool, order_id: i64) -> ServiceResult<bool> {
    let result = sqlx::query(
        "UPDATE orders SET status = 'processing' WHERE id = $1 AND status = 'pending'",
    )
    .bind(order_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Monotone terminal transition (P6): only legal from `processing`.
pub async fn finish(pool: &PgPool, order_id: i64, status: OrderStatus) -> ServiceResult<()> {
    sqlx::query("UPDATE orders SET status = $1 WHERE id = $2 AND status = 'processing'")
        .bind(status)
        .bind(order_id)
        .execute(pool)
        .await?;
    Ok(())
}
