//! Menu listing and OCR ingest endpoints (spec.md §6, §4.2).

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::menus;
use crate::error::{AppError, AppResult};
use crate::services::{ocr_ingestor, store_resolver, translation};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    lang: Option<String>,
}

/// `GET /menu/{store_id}?lang=` (spec.md §6). Excludes `price_small <= 0` rows.
pub async fn list_items(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
    Query(q): Query<MenuQuery>,
) -> AppResult<Json<Value>> {
    let lang = q.lang.unwrap_or_else(|| "en".to_string());
    let items = menus::list_items_for_store(&state.pool, store_id).await.map_err(AppError::from)?;

    let mut out = Vec::new();
    for item in items.into_iter().filter(|i| i.is_orderable()) {
        let name = translation::translate(&state.http, &state.config.translation_api_key, &item.name_zh, &lang).await;
        out.push(json!({
            "id": item.id,
            "name_native": item.name_zh,
            "name": name,
            "original_name": item.name_zh,
            "translated_name": name,
            "price_small": item.price_small,
            "price_large": item.price_large,
            "category": Value::Null,
            "original_category": Value::Null,
            "show_image": false,
        }));
    }

    Ok(Json(json!(out)))
}

/// `POST /menu/process-ocr` (multipart: `image`, `store_id`, optional
/// `user_id`, `lang`, `simple_mode`). 201 on success, 400/422/500 per
/// spec.md §4.2 failure semantics (propagated through `AppError`).
pub async fn process_ocr(State(state): State<AppState>, mut multipart: Multipart) -> AppResult<(StatusCode, Json<Value>)> {
    let mut image_bytes: Option<Vec<u8>> = None;
    let mut raw_store_id: Option<String> = None;
    let mut line_user_id: Option<String> = None;
    let mut lang = "en".to_string();
    let mut simple_mode = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_request(format!("malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "image" => {
                image_bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::invalid_request(format!("could not read image field: {e}")))?
                        .to_vec(),
                );
            }
            "store_id" => raw_store_id = Some(text_field(field).await?),
            "user_id" => line_user_id = Some(text_field(field).await?),
            "lang" => lang = text_field(field).await?,
            "simple_mode" => simple_mode = text_field(field).await? == "true",
            _ => {}
        }
    }

    let image_bytes = image_bytes.ok_or_else(|| AppError::invalid_request("missing image field"))?;
    let raw_store_id = raw_store_id.ok_or_else(|| AppError::invalid_request("missing store_id field"))?;

    let store_id = store_resolver::resolve(&state.pool, &raw_store_id).await.map_err(AppError::from)?;
    let user_id = resolve_user(&state, line_user_id.as_deref(), &lang).await?;

    let preprocessed = ocr_ingestor::preprocess_image(&image_bytes)?;

    let result = ocr_ingestor::ingest(
        &state.pool,
        &state.http,
        &state.config.vision_api_key,
        &state.config.vision_endpoint,
        &preprocessed,
        user_id,
        Some(store_id),
        &lang,
        simple_mode,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(serde_json::to_value(result).unwrap())))
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::invalid_request(format!("malformed text field: {e}")))
}

async fn resolve_user(state: &AppState, line_user_id: Option<&str>, lang: &str) -> AppResult<i64> {
    let language = crate::models::language::normalize(lang);
    let (id, is_guest) = match line_user_id {
        Some(id) if !id.is_empty() => (id.to_string(), false),
        _ => (crate::models::user::guest_identifier(now_unix_ms()), true),
    };
    let user = crate::db::users::find_or_create(&state.pool, &id, language, is_guest)
        .await
        .map_err(AppError::from)?;
    Ok(user.id)
}

fn now_unix_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
