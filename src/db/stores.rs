//! Store rows. The Store Resolver (C1) is the only caller allowed to create
//! rows here; concurrent first-writes of the same `place_id` are collapsed by
//! the unique index, per spec §4.1 and §9 ("Store-key polymorphism").

use sqlx::PgPool;

use crate::error::ServiceResult;
use crate::models::Store;

const SELECT_COLUMNS: &str = "id, store_name, partner_level, place_id, latitude, longitude, review_text, top_dishes";

pub async fn find_by_id(pool: &PgPool, id: i64) -> ServiceResult<Option<Store>> {
    let row = sqlx::query_as::<_, Store>(&format!(
        "SELECT {SELECT_COLUMNS} FROM stores WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_place_id(pool: &PgPool, place_id: &str) -> ServiceResult<Option<Store>> {
    let row = sqlx::query_as::<_, Store>(&format!(
        "SELECT {SELECT_COLUMNS} FROM stores WHERE place_id = $1"
    ))
    .bind(place_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Inserts a partner_level=0 Store for an unseen Place ID. On a unique-violation
/// race the caller is expected to re-`find_by_place_id` (spec §4.1 algorithm).
pub async fn create_from_place_id(
    pool: &PgPool,
    place_id: &str,
    display_name: &str,
) -> ServiceResult<Store> {
    let row = sqlx::query_as::<_, Store>(&format!(
        r#"
        INSERT INTO stores (store_name, partner_level, place_id, top_dishes)
        VALUES ($1, 0, $2, ARRAY[]::text[])
        RETURNING {SELECT_COLUMNS}
        "#
    ))
    .bind(display_name)
    .bind(place_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn list_all(pool: &PgPool) -> ServiceResult<Vec<Store>> {
    let rows = sqlx::query_as::<_, Store>(&format!(
        "SELECT {SELECT_COLUMNS} FROM stores ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Used by `GET /stores/check-partner-status` `has_menu` (spec §6): true iff
/// at least one priced MenuItem exists through this store's Menus.
pub async fn has_priced_menu(pool: &PgPool, store_id: i64) -> ServiceResult<bool> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM menu_items mi
            JOIN menus m ON m.id = mi.menu_id
            WHERE m.store_id = $1 AND mi.price_small > 0
        )
        "#,
    )
    .bind(store_id)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}
