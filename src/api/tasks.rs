//! `POST /orders/process-task` (spec.md §6, §4.8): the Cloud Tasks callback.
//! OIDC-verified before the pipeline ever runs.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::external::oidc;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TaskPayload {
    order_id: i64,
}

pub async fn process_task(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Json(payload): Json<TaskPayload>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let token = bearer_token(&headers)?;

    oidc::verify(
        &state.jwks,
        &state.http,
        token,
        &state.config.base_url,
        &state.config.tasks_invoker_service_account,
    )
    .await?;

    crate::services::pipeline::process_task(&state, payload.order_id).await?;

    Ok((StatusCode::OK, Json(json!({ "ok": true }))))
}

fn bearer_token(headers: &axum::http::HeaderMap) -> AppResult<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::invalid_request("missing bearer token"))
}
