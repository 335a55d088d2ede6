//! Order submission/status endpoints (spec.md §6, §4.8). `quick` is the
//! canonical entrypoint; the four legacy paths share the same handler body
//! and differ only in an optional `?sync=true` escape hatch (Open Question 3).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::services::pipeline::{self, SubmissionDialect};
use crate::state::AppState;

pub async fn quick(State(state): State<AppState>, Json(dialect): Json<SubmissionDialect>) -> AppResult<(StatusCode, Json<Value>)> {
    let outcome = pipeline::submit(&state, dialect).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "order_id": outcome.order_id, "status": "pending", "poll_url": outcome.poll_url })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct SyncFlag {
    #[serde(default)]
    sync: bool,
}

/// Legacy submission endpoints (`/orders`, `/orders/simple`, `/orders/ocr`,
/// `/orders/ocr-optimized`) all accept either dialect and funnel through the
/// same coordinator call; `?sync=true` additionally awaits the background
/// pipeline inline instead of detaching it.
pub async fn legacy_submit(
    State(state): State<AppState>,
    Query(flag): Query<SyncFlag>,
    Json(dialect): Json<SubmissionDialect>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let outcome = pipeline::submit(&state, dialect).await?;

    if flag.sync {
        pipeline::process_task(&state, outcome.order_id).await?;
        let status = pipeline::status(&state, outcome.order_id).await?;
        return Ok((StatusCode::OK, Json(serde_json::to_value(status).unwrap())));
    }

    Ok((
        StatusCode::OK,
        Json(json!({ "order_id": outcome.order_id, "status": "pending", "poll_url": outcome.poll_url })),
    ))
}

pub async fn status(State(state): State<AppState>, Path(order_id): Path<i64>) -> AppResult<Json<Value>> {
    let response = pipeline::status(&state, order_id).await?;
    Ok(Json(serde_json::to_value(response).unwrap()))
}
