//! Order Pipeline Coordinator (C8, spec §4.8). Splits user-visible latency
//! from heavy processing: `submit` returns in ~2s, `process_task` runs the
//! background pipeline, `status` serves 2s polling.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::{orders, stores, summaries, users};
use crate::error::{AppError, AppResult};
use crate::models::OrderStatus;
use crate::services::normalizer::{self, RawCartItem};
use crate::services::{line_push, order_writer, store_resolver, summary_renderer, translation, voice};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SubmissionDialect {
    /// `{store_id, user_id, items:[{menu_item_id, quantity, price}], language}`
    Partner {
        store_id: Value,
        user_id: Option<Value>,
        line_user_id: Option<String>,
        items: Vec<RawCartItem>,
        language: Option<String>,
        lang: Option<String>,
    },
    /// `{line_user_id, lang, items:[...]}` — the simple/OCR dialect.
    Simple {
        line_user_id: Option<String>,
        store_id: Option<Value>,
        lang: Option<String>,
        items: Vec<RawCartItem>,
    },
}

pub struct SubmitOutcome {
    pub order_id: i64,
    pub poll_url: String,
}

/// `submit` (spec §4.8). Target latency <= 2s: resolves store, resolves or
/// creates the user, normalises the cart, writes a pending Order, and
/// returns — the heavy work happens in `process_task`.
pub async fn submit(state: &AppState, dialect: SubmissionDialect) -> AppResult<SubmitOutcome> {
    let (raw_store_id, raw_line_user_id, raw_language, raw_items) = match dialect {
        SubmissionDialect::Partner { store_id, line_user_id, items, language, lang, .. } => {
            (value_to_raw_key(&store_id), line_user_id, language.or(lang), items)
        }
        SubmissionDialect::Simple { line_user_id, store_id, lang, items } => {
            let store_key = store_id.as_ref().map(value_to_raw_key).unwrap_or_default();
            (store_key, line_user_id, lang, items)
        }
    };

    let store_id = store_resolver::resolve(&state.pool, &raw_store_id).await?;
    let language = crate::models::language::normalize(raw_language.as_deref().unwrap_or("en")).to_string();

    let (line_user_id, is_guest) = match &raw_line_user_id {
        Some(id) if !id.is_empty() => (id.clone(), false),
        _ => (crate::models::user::guest_identifier(now_unix_ms()), true),
    };
    let user = users::find_or_create(&state.pool, &line_user_id, &language, is_guest).await?;

    let cart = normalizer::normalize_cart(&raw_items);
    if cart.is_empty() {
        return Err(AppError::invalid_request("cart is empty after normalisation"));
    }

    let (order, _items) =
        order_writer::write_pending_order(&state.pool, user.id, store_id, &language, &cart).await?;

    schedule_background_task(state, order.id).await;

    Ok(SubmitOutcome {
        order_id: order.id,
        poll_url: format!("{}/api/orders/status/{}", state.config.base_url.trim_end_matches('/'), order.id),
    })
}

fn value_to_raw_key(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn now_unix_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Cloud Tasks dispatch is an external collaborator outside the core's
/// contractual surface (spec §1); when no queue is configured we run the
/// background pipeline in a detached task so local/dev deployments still work.
async fn schedule_background_task(state: &AppState, order_id: i64) {
    if state.config.cloud_run_service_url.is_empty() {
        let state = state.clone();
        tokio::spawn(async move {
            if let Err(e) = process_task(&state, order_id).await {
                tracing::error!(order_id, error = %e, "background pipeline failed");
            }
        });
        return;
    }
    tracing::debug!(order_id, "task dispatch left to the configured Cloud Tasks queue");
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub order_id: i64,
    pub status: String,
    pub processing: bool,
    pub store_name: Option<String>,
    pub total_amount: Option<i64>,
    pub order_time: Option<chrono::DateTime<chrono::Utc>>,
    pub voice_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_url: Option<String>,
    pub summary_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryPayload>,
}

#[derive(Debug, Serialize)]
pub struct SummaryPayload {
    pub chinese: String,
    pub translated: String,
}

/// `status(order_id)` (spec §4.8). An unknown order id is `not_found`/200,
/// never 404, to keep client polling simple (spec §8 boundary behaviours).
pub async fn status(state: &AppState, order_id: i64) -> AppResult<StatusResponse> {
    let Some(order) = orders::find_by_id(&state.pool, order_id).await? else {
        return Ok(StatusResponse {
            order_id,
            status: "not_found".to_string(),
            processing: false,
            store_name: None,
            total_amount: None,
            order_time: None,
            voice_ready: false,
            voice_url: None,
            summary_ready: false,
            summary: None,
        });
    };

    let store = stores::find_by_id(&state.pool, order.store_id).await?;
    let summary = summaries::find_by_order(&state.pool, order_id).await?;
    let voice_url = summary.as_ref().and_then(|s| s.voice_url.clone());

    Ok(StatusResponse {
        order_id: order.id,
        status: order.status.as_str().to_string(),
        processing: order.status.is_processing(),
        store_name: store.map(|s| s.store_name),
        total_amount: Some(order.total_amount),
        order_time: Some(order.order_time),
        voice_ready: voice_url.is_some(),
        voice_url,
        summary_ready: summary.is_some(),
        summary: summary.map(|s| SummaryPayload { chinese: s.chinese_summary, translated: s.user_language_summary }),
    })
}

/// `process_task(order_id)` (spec §4.8). Invoked by the task dispatcher with
/// an OIDC-signed request (verified by the HTTP handler before this is
/// called); idempotent via the CAS in step 1.
pub async fn process_task(state: &AppState, order_id: i64) -> AppResult<()> {
    if !orders::try_begin_processing(&state.pool, order_id).await? {
        tracing::debug!(order_id, "process_task no-op: order already processing or terminal");
        return Ok(());
    }

    let result = run_pipeline(state, order_id).await;

    match result {
        Ok(()) => orders::finish(&state.pool, order_id, OrderStatus::Completed).await?,
        Err(e) => {
            tracing::error!(order_id, error = %e, "pipeline step failed, marking order failed");
            orders::finish(&state.pool, order_id, OrderStatus::Failed).await?;
        }
    }
    Ok(())
}

async fn run_pipeline(state: &AppState, order_id: i64) -> AppResult<()> {
    let order = orders::find_by_id(&state.pool, order_id)
        .await?
        .ok_or_else(|| AppError::order_not_found(order_id))?;
    let order_items = orders::items_for_order(&state.pool, order_id).await?;
    let store = stores::find_by_id(&state.pool, order.store_id).await?;
    let user = users::find_by_id(&state.pool, order.user_id).await?;

    let cart: Vec<normalizer::CanonicalItem> = order_items
        .iter()
        .map(|i| normalizer::CanonicalItem {
            original: i.original_name.clone(),
            translated: i.translated_name.clone(),
            quantity: i.quantity,
            price: if i.quantity > 0 { i.subtotal / i.quantity as i64 } else { 0 },
            menu_item_id: Some(i.menu_item_id.to_string()),
        })
        .collect();

    let language = order.language.clone();
    let store_name = store.as_ref().map(|s| s.store_name.clone()).unwrap_or_default();

    let config = &state.config;
    let http = state.http.clone();
    let api_key = config.translation_api_key.clone();
    let translate = |text: String| {
        let http = http.clone();
        let api_key = api_key.clone();
        let language = language.clone();
        async move {
            if text.is_empty() {
                return text;
            }
            translation::translate(&http, &api_key, &text, &language).await
        }
    };

    let rendered = summary_renderer::render(&store_name, &cart, &language, translate).await;

    let synthesis = voice::synthesize(&state.http, config, &rendered.voice_text, 1.0).await;
    let voice_url = match &synthesis.local_path {
        Some(path) => voice::upload(&state.s3, config, path, order_id).await,
        None => None,
    };

    let mut tx = state.pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;
    summaries::insert(
        &mut tx,
        order_id,
        &rendered.chinese_summary,
        &rendered.user_language_summary,
        &language,
        order.total_amount,
        voice_url.as_deref(),
    )
    .await?;
    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    if let Some(user) = &user {
        let duration_ms = if synthesis.is_fallback { None } else { Some(synthesis.duration_ms) };
        let push_result = line_push::push(
            &state.http,
            &config.line_channel_access_token,
            &user.line_user_id,
            &rendered.chinese_summary,
            &rendered.user_language_summary,
            order.total_amount,
            voice_url.as_deref(),
            duration_ms,
        )
        .await;
        // Push failure is non-fatal (spec §4.7): the Order still completes.
        if let Err(e) = push_result {
            tracing::warn!(order_id, error = %e, "LINE push failed, order still completing");
        }
    }

    Ok(())
}
