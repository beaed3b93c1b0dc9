//! Router configuration.

use crate::handlers::{get_event, health_check, index, not_found, post_event, readiness_check};
use crate::middleware::{catch_panic_layer, correlation_id_layer};
use crate::state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::trace::TraceLayer;

/// Path of the journal event resource.
pub const JOURNAL_EVENT_PATH: &str = "/journalevent/";

/// Build the relay router.
///
/// Unknown paths fall through to a JSON `404`. Known paths with the wrong
/// method get axum's `405`. A handler panic becomes a JSON `500` for that
/// request.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.body_limit;

    Router::new()
        .route("/", get(index))
        .route(JOURNAL_EVENT_PATH, get(get_event).post(post_event))
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
