//! HTTP request handlers.

pub mod health;
pub mod journal_event;

use crate::error::AppError;
use axum::{http::Uri, response::Html};

pub use health::{health_check, readiness_check};
pub use journal_event::{get_event, post_event};

/// Landing page.
#[allow(clippy::unused_async)]
pub async fn index() -> Html<&'static str> {
    Html("<h1>Hello!</h1>")
}

/// Fallback for paths with no registered resource.
#[allow(clippy::unused_async)]
pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "No route");
    AppError::not_found(uri.path())
}
