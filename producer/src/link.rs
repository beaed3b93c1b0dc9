//! The producer lifecycle: start, forward journal entries, stop.
//!
//! A [`CarrierLink`] is what the game plugin holds for its lifetime. It owns
//! the relay client and reports its state to a [`StatusSink`] (the label in
//! the game overlay, or just the log).
//!
//! ```text
//! start ──► "Initialising..." (green)
//!   │
//!   ├─ journal_entry ──► POST ──► Acknowledgement | TransportError
//!   │                      └─ relay unreachable ──► "Carrier relay unreachable." (red)
//!   ├─ prefs_changed ──► rebuild client
//!   │
//! stop ───► "No link to Carrier." (grey) ──► best-effort Shutdown event
//! ```

use crate::client::{Acknowledgement, RelayClient};
use crate::error::TransportError;
use crate::paths::JournalFiles;
use crate::settings::ProducerSettings;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicBool, Ordering};

/// Status text shown while the link comes up.
pub const STATUS_INITIALISING: &str = "Initialising...";

/// Status text shown while the relay cannot be reached.
pub const STATUS_UNREACHABLE: &str = "Carrier relay unreachable.";

/// Status text shown when the relay answers again after being unreachable.
pub const STATUS_LINKED: &str = "Linked to Carrier.";

/// Status text shown once the link is stopped.
pub const STATUS_NO_LINK: &str = "No link to Carrier.";

/// `event` value of the farewell sent on stop.
pub const SHUTDOWN_EVENT: &str = "Shutdown";

/// `reason` value of the farewell sent on stop.
pub const SHUTDOWN_REASON: &str = "plugin stopped";

/// Colour of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    /// Link is (coming) up.
    Green,
    /// Link is down.
    Grey,
    /// Relay is not answering.
    Red,
}

impl StatusColor {
    /// Tk-style colour name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Grey => "grey",
            Self::Red => "red",
        }
    }
}

/// Display surface for link status.
pub trait StatusSink: Send + Sync {
    /// Replace the current status line.
    fn set_status(&self, text: &str, color: StatusColor);
}

/// Status sink that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStatus;

impl StatusSink for TracingStatus {
    fn set_status(&self, text: &str, color: StatusColor) {
        tracing::info!(status = text, color = color.as_str(), "Carrier link status");
    }
}

/// The producer's connection to the relay.
pub struct CarrierLink<S> {
    client: RelayClient,
    status: S,
    journal: JournalFiles,
    shutting_down: AtomicBool,
    unreachable: AtomicBool,
}

impl<S: StatusSink> CarrierLink<S> {
    /// Bring the link up from `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] if the settings do not form a
    /// usable relay URL.
    pub fn start(settings: &ProducerSettings, status: S) -> Result<Self, TransportError> {
        let client = RelayClient::from_settings(settings)?;
        let journal = JournalFiles::default();

        tracing::info!(
            target_url = %client.url(),
            journal_dir = %journal.dir.display(),
            discord = ?settings.discord,
            "Starting Carrier link"
        );
        status.set_status(STATUS_INITIALISING, StatusColor::Green);

        Ok(Self {
            client,
            status,
            journal,
            shutting_down: AtomicBool::new(false),
            unreachable: AtomicBool::new(false),
        })
    }

    /// Use a specific journal directory layout instead of the host default.
    #[must_use]
    pub fn with_journal_files(mut self, journal: JournalFiles) -> Self {
        self.journal = journal;
        self
    }

    /// Forward one journal entry to the relay.
    ///
    /// # Errors
    ///
    /// [`TransportError::ShuttingDown`] after [`CarrierLink::stop`]; otherwise
    /// whatever the relay request failed with. Nothing is retried.
    ///
    /// A timeout or refused connection turns the status red; the next entry
    /// the relay accepts turns it green again.
    pub async fn journal_entry(&self, entry: &Value) -> Result<Acknowledgement, TransportError> {
        if self.is_shutting_down() {
            return Err(TransportError::ShuttingDown);
        }

        tracing::debug!(event = ?entry.get("event"), "Forwarding journal entry");
        match self.client.submit(entry).await {
            Ok(ack) => {
                if self.unreachable.swap(false, Ordering::SeqCst) {
                    self.status.set_status(STATUS_LINKED, StatusColor::Green);
                }
                Ok(ack)
            }
            Err(e) => {
                if e.is_unreachable() && !self.unreachable.swap(true, Ordering::SeqCst) {
                    self.status.set_status(STATUS_UNREACHABLE, StatusColor::Red);
                }
                Err(e)
            }
        }
    }

    /// Pick up edited preferences.
    ///
    /// On error the previous client stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] if the new settings do not form
    /// a usable relay URL.
    pub fn prefs_changed(&mut self, settings: &ProducerSettings) -> Result<(), TransportError> {
        let client = RelayClient::from_settings(settings)?;
        tracing::info!(target_url = %client.url(), "Relay target updated");
        self.client = client;
        Ok(())
    }

    /// Stop the link and tell the relay we are leaving.
    ///
    /// The farewell is best effort: its acknowledgement is returned when it
    /// arrives, a failure is logged and swallowed.
    pub async fn stop(&self) -> Option<Acknowledgement> {
        tracing::info!("Stopping Carrier link");
        self.shutting_down.store(true, Ordering::SeqCst);
        self.status.set_status(STATUS_NO_LINK, StatusColor::Grey);

        let farewell = json!({ "event": SHUTDOWN_EVENT, "reason": SHUTDOWN_REASON });
        match self.client.submit(&farewell).await {
            Ok(ack) => {
                tracing::debug!(reply = %ack.event, "Relay acknowledged shutdown");
                Some(ack)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not deliver shutdown event");
                None
            }
        }
    }

    /// Whether [`CarrierLink::stop`] has run.
    #[must_use]
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }

    /// The relay client in use.
    #[must_use]
    pub const fn client(&self) -> &RelayClient {
        &self.client
    }

    /// Journal file layout for the watcher.
    #[must_use]
    pub const fn journal_files(&self) -> &JournalFiles {
        &self.journal
    }
}
