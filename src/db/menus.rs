//! Menu / MenuItem rows, including the synthetic catch-all Menu used for
//! OCR/ad-hoc items so `OrderItem.menu_item_id` stays NOT NULL (spec §4.4, §9).

use sqlx::PgPool;

use crate::error::ServiceResult;
use crate::models::{Menu, MenuItem};

pub async fn list_items_for_store(pool: &PgPool, store_id: i64) -> ServiceResult<Vec<MenuItem>> {
    let rows = sqlx::query_as::<_, MenuItem>(
        r#"
        SELECT mi.id, mi.menu_id, mi.name_zh, mi.price_small, mi.price_large
        FROM menu_items mi
        JOIN menus m ON m.id = mi.menu_id
        WHERE m.store_id = $1
        ORDER BY mi.id
        "#,
    )
    .bind(store_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_item(pool: &PgPool, menu_item_id: i64) -> ServiceResult<Option<MenuItem>> {
    let row = sqlx::query_as::<_, MenuItem>(
        "SELECT id, menu_id, name_zh, price_small, price_large FROM menu_items WHERE id = $1",
    )
    .bind(menu_item_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Returns the store's catch-all Menu, creating it lazily on first use.
pub async fn get_or_create_catch_all_menu(
    tx: &mut sqlx::PgConnection,
    store_id: i64,
) -> ServiceResult<Menu> {
    if let Some(existing) = sqlx::query_as::<_, Menu>(
        "SELECT id, store_id, version, effective_date, is_catch_all
         FROM menus WHERE store_id = $1 AND is_catch_all = TRUE",
    )
    .bind(store_id)
    .fetch_optional(&mut *tx)
    .await?
    {
        return Ok(existing);
    }

    let row = sqlx::query_as::<_, Menu>(
        r#"
        INSERT INTO menus (store_id, version, effective_date, is_catch_all)
        VALUES ($1, 0, now(), TRUE)
        ON CONFLICT (store_id) WHERE is_catch_all DO UPDATE SET store_id = EXCLUDED.store_id
        RETURNING id, store_id, version, effective_date, is_catch_all
        "#,
    )
    .bind(store_id)
    .fetch_one(&mut *tx)
    .await?;
    Ok(row)
}

/// Snapshots a Chinese name and price into a synthetic MenuItem under the
/// store's catch-all Menu (spec §4.4 step 2b/2c).
pub async fn create_synthetic_item(
    tx: &mut sqlx::PgConnection,
    menu_id: i64,
    name_zh: &str,
    price: i64,
) -> ServiceResult<MenuItem> {
    let row = sqlx::query_as::<_, MenuItem>(
        r#"
        INSERT INTO menu_items (menu_id, name_zh, price_small, price_large)
        VALUES ($1, $2, $3, NULL)
        RETURNING id, menu_id, name_zh, price_small, price_large
        "#,
    )
    .bind(menu_id)
    .bind(name_zh)
    .bind(price)
    .fetch_one(&mut *tx)
    .await?;
    Ok(row)
}
