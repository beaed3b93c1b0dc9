//! The journal event resource.
//!
//! `POST` normalizes the body, swaps the event into the cache, and echoes the
//! event this request submitted. `GET` reads the slot. Neither holds the cache
//! lock while parsing or serializing.

use crate::{WebResult, state::AppState};
use axum::{Json, body::Bytes, extract::State};
use carrier_relay_core::{EventResponse, normalize};

/// Return the last accepted event, or the `"None"` sentinel.
///
/// # Endpoint
///
/// ```text
/// GET /journalevent/
/// ```
#[allow(clippy::unused_async)]
pub async fn get_event(State(state): State<AppState>) -> Json<EventResponse> {
    metrics::counter!("relay_reads_total").increment(1);

    let slot = state.cache.get();
    tracing::debug!(holding = slot.is_some(), "Serving cached event");

    Json(EventResponse::from_slot(slot))
}

/// Accept a journal event.
///
/// The body may be the envelope object itself or a JSON string holding the
/// serialized envelope. The cache is only touched after normalization
/// succeeds, so rejected or truncated bodies leave it as it was.
///
/// # Endpoint
///
/// ```text
/// POST /journalevent/
/// ```
///
/// # Errors
///
/// `400` with a reason when the body is not JSON or lacks `event`.
#[allow(clippy::unused_async)]
pub async fn post_event(State(state): State<AppState>, body: Bytes) -> WebResult<Json<EventResponse>> {
    let event = normalize(&body).map_err(|err| {
        metrics::counter!("relay_events_rejected_total", "reason" => err.code()).increment(1);
        tracing::warn!(error = %err, body_len = body.len(), "Rejected journal event");
        err
    })?;

    let response = EventResponse::echo(&event);
    let sequence = state.cache.put(event);

    metrics::counter!("relay_events_accepted_total").increment(1);
    tracing::info!(sequence, event = %response.event, "Accepted journal event");

    Ok(Json(response))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::error::AppError;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_empty() {
        let Json(body) = get_event(State(AppState::new())).await;
        assert_eq!(body, EventResponse::empty());
    }

    #[tokio::test]
    async fn test_post_echoes_and_caches() {
        let state = AppState::new();
        let Json(body) = post_event(
            State(state.clone()),
            Bytes::from_static(br#"{"event": {"foo": "bar"}}"#),
        )
        .await
        .unwrap();
        assert_eq!(body.event, json!({"foo": "bar"}));

        let Json(body) = get_event(State(state)).await;
        assert_eq!(body.event, json!({"foo": "bar"}));
    }

    #[tokio::test]
    async fn test_post_rejects_without_touching_cache() {
        let state = AppState::new();
        let err: AppError = post_event(State(state.clone()), Bytes::from_static(b"not-json"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(state.cache.is_empty());
    }
}
