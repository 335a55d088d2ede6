//! `AppError` and the JSON envelope returned for error responses.

use super::codes::ErrorCode;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> http::StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{r} not found")).with_detail("resource", r)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    pub fn invalid_store_id(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self::with_message(ErrorCode::InvalidStoreId, format!("invalid store id: {raw}"))
            .with_detail("raw", raw)
    }

    pub fn ocr_unrecognised(notes: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::OcrUnrecognised, notes)
    }

    pub fn ocr_timeout() -> Self {
        Self::new(ErrorCode::OcrTimeout)
    }

    pub fn order_empty() -> Self {
        Self::new(ErrorCode::OrderEmpty)
    }

    pub fn order_not_found(order_id: i64) -> Self {
        Self::with_message(ErrorCode::OrderNotFound, format!("order {order_id} not found"))
    }
}

/// Error body shape returned to HTTP clients: `{"error": "...", "code": n}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ErrorBody {
    fn from(e: &AppError) -> Self {
        Self {
            error: e.message.clone(),
            code: e.code.code(),
            details: e.details.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ErrorBody::from(&self);

        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(code = %self.code, message = %self.message, "system error");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_message() {
        let e = AppError::new(ErrorCode::NotFound);
        assert_eq!(e.message, "Resource not found");
    }

    #[test]
    fn with_detail_accumulates() {
        let e = AppError::validation("bad").with_detail("field", "qty").with_detail("reason", "negative");
        let details = e.details.unwrap();
        assert_eq!(details.len(), 2);
    }

    #[test]
    fn not_found_sets_resource_detail() {
        let e = AppError::not_found("Order");
        assert_eq!(e.message, "Order not found");
        assert!(e.details.unwrap().contains_key("resource"));
    }

    #[test]
    fn error_body_serializes_code_as_number() {
        let e = AppError::with_message(ErrorCode::OrderNotFound, "Order 5 not found");
        let body = ErrorBody::from(&e);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 3001);
        assert_eq!(json["error"], "Order 5 not found");
    }
}
