//! Axum HTTP service for the Carrier journal event relay.
//!
//! This crate is the imperative shell around `carrier-relay-core`: it reads
//! request bodies, hands them to the normalizer, swaps the result into the
//! shared [`EventCache`](carrier_relay_core::EventCache), and maps outcomes to
//! HTTP responses.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← routing, body buffering
//! │  - correlation IDs, tracing spans       │  ← 400 / 404 mapping
//! │  - panic isolation                      │  ← 500 for that request only
//! ├─────────────────────────────────────────┤
//! │         carrier-relay-core              │
//! │  - normalize(body) → Event              │  ← pure, no I/O
//! │  - EventCache (single slot)             │  ← lock held for a swap only
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Resources
//!
//! | Method | Path | Result |
//! |---|---|---|
//! | `GET` | `/journalevent/` | `{"event": <last or "None">}` |
//! | `POST` | `/journalevent/` | `{"event": <accepted>}` |
//! | `GET` | `/health` | liveness |
//! | `GET` | `/health/ready` | slot diagnostics |
//!
//! # Example
//!
//! ```no_run
//! use carrier_relay_web::{build_router, AppState};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let app = build_router(AppState::new());
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::AppError;
pub use middleware::{
    CORRELATION_ID_HEADER, CorrelationIdExt, PanicHandler, catch_panic_layer, correlation_id_layer,
};
pub use routes::{JOURNAL_EVENT_PATH, build_router};
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
