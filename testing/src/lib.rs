//! # Carrier Relay Testing
//!
//! Testing utilities for the relay and its producer.
//!
//! This crate provides:
//! - Mock implementations of the producer's collaborator seams
//! - Journal entry fixtures shaped like real game events
//! - A helper that runs a real relay on an ephemeral port
//!
//! ## Example
//!
//! ```ignore
//! use carrier_relay_testing::{fixtures, spawn_relay};
//! use carrier_relay_producer::RelayClient;
//!
//! #[tokio::test]
//! async fn test_forwarding() {
//!     let relay = spawn_relay().await;
//!     let client = RelayClient::new(&relay.url, DEFAULT_TIMEOUT).unwrap();
//!
//!     client.submit(&fixtures::fsd_jump("Sol")).await.unwrap();
//!     assert_eq!(relay.cache.get().unwrap().as_value(), "FSDJump");
//! }
//! ```

use carrier_relay_core::EventCache;
use carrier_relay_web::{AppState, JOURNAL_EVENT_PATH, build_router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Mock implementations of the producer's collaborators.
pub mod mocks {
    use carrier_relay_producer::{
        ProducerSettings, SettingsError, SettingsStore, StatusColor, StatusSink,
    };
    use std::sync::{Arc, Mutex, PoisonError};

    /// Status sink that records every update.
    ///
    /// Clones share the same record, so a test can keep one handle and give
    /// the other to the link.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingStatus {
        updates: Arc<Mutex<Vec<(String, StatusColor)>>>,
    }

    impl RecordingStatus {
        /// Create an empty recorder.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// All updates so far, oldest first.
        #[must_use]
        pub fn updates(&self) -> Vec<(String, StatusColor)> {
            self.updates
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// The most recent update.
        #[must_use]
        pub fn last(&self) -> Option<(String, StatusColor)> {
            self.updates().pop()
        }
    }

    impl StatusSink for RecordingStatus {
        fn set_status(&self, text: &str, color: StatusColor) {
            self.updates
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((text.to_string(), color));
        }
    }

    /// In-memory settings store.
    #[derive(Debug, Clone, Default)]
    pub struct MemorySettingsStore {
        stored: Arc<Mutex<Option<ProducerSettings>>>,
        saves: Arc<Mutex<usize>>,
    }

    impl MemorySettingsStore {
        /// Store pre-populated with `settings`.
        #[must_use]
        pub fn with(settings: ProducerSettings) -> Self {
            Self {
                stored: Arc::new(Mutex::new(Some(settings))),
                saves: Arc::default(),
            }
        }

        /// Number of times `save` was called.
        #[must_use]
        pub fn save_count(&self) -> usize {
            *self.saves.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl SettingsStore for MemorySettingsStore {
        fn load(&self) -> Result<ProducerSettings, SettingsError> {
            Ok(self
                .stored
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
                .unwrap_or_default())
        }

        fn save(&self, settings: &ProducerSettings) -> Result<(), SettingsError> {
            *self.stored.lock().unwrap_or_else(PoisonError::into_inner) = Some(settings.clone());
            *self.saves.lock().unwrap_or_else(PoisonError::into_inner) += 1;
            Ok(())
        }
    }
}

/// Journal entries shaped like the game writes them.
pub mod fixtures {
    use serde_json::{Value, json};

    /// Hyperspace jump into `system`.
    #[must_use]
    pub fn fsd_jump(system: &str) -> Value {
        json!({
            "timestamp": "2025-01-01T00:00:00Z",
            "event": "FSDJump",
            "StarSystem": system,
            "JumpDist": 12.5,
        })
    }

    /// Docking at `station`.
    #[must_use]
    pub fn docked(station: &str) -> Value {
        json!({
            "timestamp": "2025-01-01T00:05:00Z",
            "event": "Docked",
            "StationName": station,
            "StationType": "FleetCarrier",
        })
    }

    /// An entry without an `event` key, which the relay rejects.
    #[must_use]
    pub fn eventless() -> Value {
        json!({ "timestamp": "2025-01-01T00:00:00Z", "foo": "bar" })
    }
}

/// A relay running on an ephemeral local port.
pub struct TestRelay {
    /// Bound address.
    pub addr: SocketAddr,
    /// Full URL of the journal event resource.
    pub url: String,
    /// The relay's cache, for direct inspection.
    pub cache: Arc<EventCache>,
    handle: JoinHandle<()>,
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start a relay on `127.0.0.1:0`.
///
/// # Panics
///
/// Panics if the listener cannot be bound.
#[allow(clippy::expect_used)]
pub async fn spawn_relay() -> TestRelay {
    let cache = Arc::new(EventCache::new());
    let app = build_router(AppState::with_cache(Arc::clone(&cache)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener has an address");

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Test relay stopped");
        }
    });

    TestRelay {
        addr,
        url: format!("http://{addr}{JOURNAL_EVENT_PATH}"),
        cache,
        handle,
    }
}

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{MemorySettingsStore, RecordingStatus};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use carrier_relay_producer::{ProducerSettings, SettingsStore, StatusColor, StatusSink};

    #[test]
    fn test_recording_status_shares_record() {
        let status = RecordingStatus::new();
        let handle = status.clone();
        status.set_status("Initialising...", StatusColor::Green);
        assert_eq!(
            handle.last(),
            Some(("Initialising...".to_string(), StatusColor::Green))
        );
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySettingsStore::default();
        assert_eq!(store.load().unwrap(), ProducerSettings::default());

        let settings = ProducerSettings {
            target_port: 5020,
            ..ProducerSettings::default()
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_fixtures_carry_event_key() {
        assert_eq!(fixtures::fsd_jump("Sol")["event"], "FSDJump");
        assert_eq!(fixtures::docked("Jameson Memorial")["event"], "Docked");
        assert!(fixtures::eventless().get("event").is_none());
    }

    #[tokio::test]
    async fn test_spawned_relay_answers() {
        let relay = spawn_relay().await;
        assert!(relay.url.ends_with("/journalevent/"));
        assert!(relay.cache.is_empty());
    }
}
