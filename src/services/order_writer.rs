//! Order Writer (C4, spec §4.4). Persists a pending Order + OrderItems while
//! respecting the schema's NOT-NULL `menu_item_id` (spec §9 "Foreign-key-safe
//! OCR items"). Any failure rolls the whole transaction back (spec §4.4
//! "Invariants on failure").

use sqlx::PgPool;

use crate::db::{menus, ocr, orders};
use crate::error::{AppError, ServiceResult};
use crate::models::ocr::{parse_temp_item_id, TempItemRef};
use crate::models::{Order, OrderItem};
use crate::services::normalizer::CanonicalItem;

pub async fn write_pending_order(
    pool: &PgPool,
    user_id: i64,
    store_id: i64,
    language: &str,
    cart: &[CanonicalItem],
) -> ServiceResult<(Order, Vec<OrderItem>)> {
    if cart.is_empty() {
        return Err(AppError::order_empty().into());
    }

    let mut tx = pool.begin().await?;
    let mut resolved = Vec::with_capacity(cart.len());

    for item in cart {
        let menu_item_id = resolve_menu_item_id(pool, &mut tx, store_id, item).await?;
        resolved.push(orders::NewOrderItem {
            menu_item_id,
            quantity: item.quantity,
            subtotal: item.quantity as i64 * item.price,
            original_name: item.original.clone(),
            translated_name: item.translated.clone(),
        });
    }

    let (order, items) = orders::create_pending(&mut tx, user_id, store_id, language, resolved).await?;
    tx.commit().await?;
    Ok((order, items))
}

/// Step 2a/2b/2c of spec §4.4: an existing integer id wins; otherwise a temp
/// id is traced back to its OCRMenuItem; otherwise a bare ad-hoc item gets a
/// fresh synthetic row. Always returns a `MenuItem.id` that exists (P9).
async fn resolve_menu_item_id(
    pool: &PgPool,
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    store_id: i64,
    item: &CanonicalItem,
) -> ServiceResult<i64> {
    if let Some(raw_id) = &item.menu_item_id {
        if let Ok(id) = raw_id.parse::<i64>() {
            if menus::find_item(pool, id).await?.is_some() {
                return Ok(id);
            }
        }
        if let Some(parsed) = parse_temp_item_id(raw_id) {
            return create_synthetic_from_ocr(pool, tx, store_id, parsed, item).await;
        }
    }

    let catch_all = menus::get_or_create_catch_all_menu(&mut **tx, store_id).await?;
    let synthetic =
        menus::create_synthetic_item(&mut **tx, catch_all.id, &item.original, item.price).await?;
    Ok(synthetic.id)
}

async fn create_synthetic_from_ocr(
    pool: &PgPool,
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    store_id: i64,
    temp_ref: TempItemRef,
    item: &CanonicalItem,
) -> ServiceResult<i64> {
    let ocr_item = match temp_ref {
        TempItemRef::Direct(id) => ocr::find_item(pool, id).await?,
        TempItemRef::Indexed { ocr_menu_id, idx } => {
            ocr::find_item_by_menu_and_index(pool, ocr_menu_id, idx).await?
        }
    };

    let (name_zh, price) = match ocr_item {
        Some(row) => (row.item_name, row.price_small),
        None => (item.original.clone(), item.price),
    };

    let catch_all = menus::get_or_create_catch_all_menu(&mut **tx, store_id).await?;
    let synthetic = menus::create_synthetic_item(&mut **tx, catch_all.id, &name_zh, price).await?;
    Ok(synthetic.id)
}
