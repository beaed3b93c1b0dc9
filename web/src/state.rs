//! Application state for Axum handlers.
//!
//! The cache is owned here and injected into every handler through
//! `State<AppState>`; there is no process-wide slot.

use carrier_relay_core::EventCache;
use std::sync::Arc;

/// Default cap on a POST body, in bytes.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// State shared across all relay handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The single-slot cache for the latest journal event.
    pub cache: Arc<EventCache>,
    /// Largest POST body accepted, in bytes.
    pub body_limit: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// State with a fresh, empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache(Arc::new(EventCache::new()))
    }

    /// State around an existing cache.
    #[must_use]
    pub const fn with_cache(cache: Arc<EventCache>) -> Self {
        Self {
            cache,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Override the POST body limit.
    #[must_use]
    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }
}
