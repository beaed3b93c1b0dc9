//! Health check endpoints.

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Simple health check endpoint (for basic liveness).
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Readiness body: what the cache slot currently looks like.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Readiness {
    /// Always `"ok"` when the handler answers.
    pub status: &'static str,
    /// Whether an event has been accepted since startup.
    pub holding: bool,
    /// Sequence number of the cached event (0 when empty).
    pub sequence: u64,
    /// When the cached event was accepted.
    pub last_event_at: Option<DateTime<Utc>>,
}

/// Readiness check with slot diagnostics.
///
/// ```text
/// GET /health/ready
/// ```
///
/// ```json
/// { "status": "ok", "holding": true, "sequence": 3, "last_event_at": "2024-01-01T00:00:00Z" }
/// ```
#[allow(clippy::unused_async)]
pub async fn readiness_check(State(state): State<AppState>) -> Json<Readiness> {
    let snapshot = state.cache.snapshot();

    Json(Readiness {
        status: "ok",
        holding: snapshot.is_some(),
        sequence: snapshot.as_ref().map_or(0, |cached| cached.sequence),
        last_event_at: snapshot.map(|cached| cached.accepted_at),
    })
}
