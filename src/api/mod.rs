//! API routes for ordering-helper-backend.

pub mod health;
pub mod menu;
pub mod orders;
pub mod stores;
pub mod tasks;
pub mod voices;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[derive(Clone, Default)]
struct RequestUuid;

impl MakeRequestId for RequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        http::HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Assembles the full `/api` router. CORS mirrors spec.md §4.10: configured
/// origin list (or `Any` when none is set), the listed methods/headers, and
/// a 1-hour preflight cache.
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors(&state.config.cors_allowed_origins);

    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/stores", get(stores::list))
        .route("/stores/check-partner-status", get(stores::check_partner_status))
        .route("/stores/resolve", get(stores::resolve))
        .route("/menu/{store_id}", get(menu::list_items))
        .route("/menu/process-ocr", post(menu::process_ocr))
        .route("/orders/quick", post(orders::quick))
        .route("/orders/status/{order_id}", get(orders::status))
        .route("/orders/process-task", post(tasks::process_task))
        .route("/orders", post(orders::legacy_submit))
        .route("/orders/simple", post(orders::legacy_submit))
        .route("/orders/ocr", post(orders::legacy_submit))
        .route("/orders/ocr-optimized", post(orders::legacy_submit))
        .route("/voices/{filename}", get(voices::serve))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(http::HeaderName::from_static("x-request-id")))
        .layer(SetRequestIdLayer::new(http::HeaderName::from_static("x-request-id"), RequestUuid))
        .layer(cors)
        .with_state(state);

    Router::new().nest("/api", api)
}

fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([
            http::header::AUTHORIZATION,
            http::header::CONTENT_TYPE,
            http::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(std::time::Duration::from_secs(3600));

    if allowed_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse::<http::HeaderValue>().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
