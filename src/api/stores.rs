//! Store endpoints (spec.md §6). `check-partner-status` and `resolve` are
//! two of the three fail-open i18n endpoints named in §9 — they degrade to a
//! usable fallback body rather than ever stalling the LIFF client on a 4xx.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::stores;
use crate::error::{AppError, AppResult};
use crate::services::{store_resolver, translation};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    lang: Option<String>,
}

pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> AppResult<Json<Value>> {
    let lang = q.lang.unwrap_or_else(|| "en".to_string());
    let rows = stores::list_all(&state.pool).await.map_err(AppError::from)?;

    let mut out = Vec::with_capacity(rows.len());
    for store in rows {
        let display_name = translation::translate(&state.http, &state.config.translation_api_key, &store.store_name, &lang).await;
        out.push(json!({
            "store_id": store.id,
            "store_name": store.store_name,
            "partner_level": store.partner_level,
            "display_name": display_name,
            "place_id": store.place_id,
            "is_partner": store.is_partner(),
        }));
    }

    Ok(Json(json!(out)))
}

#[derive(Debug, Deserialize)]
pub struct PartnerStatusQuery {
    place_id: Option<String>,
    name: Option<String>,
    lang: Option<String>,
}

/// Always 200 (spec.md §9 "Fail-open i18n endpoints"): a malformed or
/// unresolvable `place_id` degrades to the raw hint and `has_menu: false`
/// rather than erroring.
pub async fn check_partner_status(
    State(state): State<AppState>,
    Query(q): Query<PartnerStatusQuery>,
) -> Json<Value> {
    let place_id = q.place_id.unwrap_or_default();
    let name_hint = q.name.unwrap_or_default();
    let lang = q.lang.unwrap_or_else(|| "en".to_string());

    let resolved = match resolve_or_create(&state, &place_id, &name_hint).await {
        Some(store) => store,
        None => {
            let translated_name =
                translation::translate(&state.http, &state.config.translation_api_key, &name_hint, &lang).await;
            return Json(json!({
                "store_id": serde_json::Value::Null,
                "store_name": name_hint,
                "display_name": translated_name,
                "translated_name": translated_name,
                "original_name": name_hint,
                "place_id": place_id,
                "partner_level": 0,
                "is_partner": false,
                "has_menu": false,
            }));
        }
    };

    let has_menu = stores::has_priced_menu(&state.pool, resolved.id).await.unwrap_or(false);
    let translated_name =
        translation::translate(&state.http, &state.config.translation_api_key, &resolved.store_name, &lang).await;

    Json(json!({
        "store_id": resolved.id,
        "store_name": resolved.store_name,
        "display_name": translated_name,
        "translated_name": translated_name,
        "original_name": resolved.store_name,
        "place_id": resolved.place_id,
        "partner_level": resolved.partner_level,
        "is_partner": resolved.is_partner(),
        "has_menu": has_menu,
    }))
}

async fn resolve_or_create(state: &AppState, place_id: &str, name_hint: &str) -> Option<crate::models::Store> {
    if place_id.is_empty() {
        return None;
    }
    if let Ok(Some(existing)) = stores::find_by_place_id(&state.pool, place_id).await {
        return Some(existing);
    }
    let (valid, _) = store_resolver::validate_format(place_id);
    if !valid {
        return None;
    }
    let display_name = if name_hint.is_empty() { crate::models::store::DEFAULT_STORE_NAME } else { name_hint };
    stores::create_from_place_id(&state.pool, place_id, display_name).await.ok()
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    place_id: Option<String>,
    #[allow(dead_code)]
    name: Option<String>,
}

/// `GET /stores/resolve` (spec.md §6): 400 on malformed input, unlike
/// `check-partner-status` — this one is a direct C1 `resolve` call.
pub async fn resolve(State(state): State<AppState>, Query(q): Query<ResolveQuery>) -> AppResult<Json<Value>> {
    let place_id = q.place_id.ok_or_else(|| AppError::invalid_store_id(""))?;
    let store_id = store_resolver::resolve(&state.pool, &place_id).await.map_err(AppError::from)?;
    Ok(Json(json!({ "success": true, "place_id": place_id, "store_id": store_id })))
}
