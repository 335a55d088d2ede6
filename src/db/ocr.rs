//! OCRMenu / OCRMenuItem / OCRMenuTranslation rows (spec §4.2). Insert-only.

use sqlx::PgPool;

use crate::error::ServiceResult;
use crate::models::{OcrMenu, OcrMenuItem, OcrMenuTranslation};

pub struct NewOcrMenuItem<'a> {
    pub item_name: &'a str,
    pub translated_desc: &'a str,
    pub price_small: i64,
    pub price_big: i64,
}

/// Inserts the OCRMenu header and its items in one transaction (spec §4.2 step 6).
pub async fn insert_menu_with_items(
    pool: &PgPool,
    user_id: i64,
    store_id: Option<i64>,
    captured_store_name: Option<&str>,
    items: &[NewOcrMenuItem<'_>],
) -> ServiceResult<(OcrMenu, Vec<OcrMenuItem>)> {
    let mut tx = pool.begin().await?;

    let menu = sqlx::query_as::<_, OcrMenu>(
        r#"
        INSERT INTO ocr_menus (user_id, store_id, captured_store_name, uploaded_at)
        VALUES ($1, $2, $3, now())
        RETURNING id, user_id, store_id, captured_store_name, uploaded_at
        "#,
    )
    .bind(user_id)
    .bind(store_id)
    .bind(captured_store_name)
    .fetch_one(&mut *tx)
    .await?;

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let row = sqlx::query_as::<_, OcrMenuItem>(
            r#"
            INSERT INTO ocr_menu_items (ocr_menu_id, item_name, translated_desc, price_small, price_big)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, ocr_menu_id, item_name, translated_desc, price_small, price_big
            "#,
        )
        .bind(menu.id)
        .bind(item.item_name)
        .bind(item.translated_desc)
        .bind(item.price_small)
        .bind(item.price_big)
        .fetch_one(&mut *tx)
        .await?;
        rows.push(row);
    }

    tx.commit().await?;
    Ok((menu, rows))
}

pub async fn find_item(pool: &PgPool, ocr_menu_item_id: i64) -> ServiceResult<Option<OcrMenuItem>> {
    let row = sqlx::query_as::<_, OcrMenuItem>(
        "SELECT id, ocr_menu_id, item_name, translated_desc, price_small, price_big
         FROM ocr_menu_items WHERE id = $1",
    )
    .bind(ocr_menu_item_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Looks up the `idx`-th item of an OCRMenu (0-based), for `temp_{ocr_menu_id}_{idx}`
/// references (spec glossary "Temp id").
pub async fn find_item_by_menu_and_index(
    pool: &PgPool,
    ocr_menu_id: i64,
    idx: u32,
) -> ServiceResult<Option<OcrMenuItem>> {
    let row = sqlx::query_as::<_, OcrMenuItem>(
        r#"
        SELECT id, ocr_menu_id, item_name, translated_desc, price_small, price_big
        FROM ocr_menu_items
        WHERE ocr_menu_id = $1
        ORDER BY id
        OFFSET $2 LIMIT 1
        "#,
    )
    .bind(ocr_menu_id)
    .bind(idx as i64)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn insert_translation(
    pool: &PgPool,
    ocr_menu_item_id: i64,
    language: &str,
    translated_name: &str,
    translated_description: &str,
) -> ServiceResult<OcrMenuTranslation> {
    let row = sqlx::query_as::<_, OcrMenuTranslation>(
        r#"
        INSERT INTO ocr_menu_translations (ocr_menu_item_id, language, translated_name, translated_description)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (ocr_menu_item_id, language)
        DO UPDATE SET translated_name = EXCLUDED.translated_name,
                      translated_description = EXCLUDED.translated_description
        RETURNING id, ocr_menu_item_id, language, translated_name, translated_description
        "#,
    )
    .bind(ocr_menu_item_id)
    .bind(language)
    .bind(translated_name)
    .bind(translated_description)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
