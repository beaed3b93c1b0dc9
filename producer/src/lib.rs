//! # Carrier Relay Producer
//!
//! The game-side half of the relay: forwards journal entries to the relay
//! server as they happen, one request per entry.
//!
//! ## Example
//!
//! ```no_run
//! use carrier_relay_producer::{CarrierLink, JsonFileStore, SettingsStore, TracingStatus};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = JsonFileStore::new("carrier.json").load()?;
//!     let link = CarrierLink::start(&settings, TracingStatus)?;
//!
//!     let ack = link.journal_entry(&json!({"event": "FSDJump", "StarSystem": "Sol"})).await?;
//!     println!("relay accepted {}", ack.event);
//!
//!     link.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Delivery
//!
//! - One POST per entry, bounded by the configured timeout (5s by default)
//! - No batching, no retry: failures come back as [`TransportError`]
//! - Bodies are double-encoded by default, which the relay unwraps

pub mod client;
pub mod error;
pub mod link;
pub mod paths;
pub mod settings;

// Re-export main types for convenience
pub use client::{Acknowledgement, DEFAULT_TIMEOUT, PayloadEncoding, RelayClient};
pub use error::{SettingsError, TransportError};
pub use link::{
    CarrierLink, SHUTDOWN_EVENT, SHUTDOWN_REASON, STATUS_INITIALISING, STATUS_LINKED, STATUS_NO_LINK,
    STATUS_UNREACHABLE, StatusColor, StatusSink, TracingStatus,
};
pub use paths::{HostOs, JournalFiles, default_journal_dir, journal_dir};
pub use settings::{DiscordSettings, JsonFileStore, ProducerSettings, SettingsStore};
