//! Error types for the producer side.

use std::time::Duration;
use thiserror::Error;

/// Failures delivering an event to the relay.
///
/// The producer never retries. Every one of these goes back to whoever asked
/// for the event to be sent.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured relay URL does not parse
    #[error("Invalid relay URL {url:?}: {reason}")]
    InvalidUrl {
        /// URL as configured
        url: String,
        /// Parser message
        reason: String,
    },

    /// The relay did not answer in time
    #[error("Relay did not answer within {0:?}")]
    Timeout(Duration),

    /// The relay could not be reached
    #[error("Could not connect to relay: {0}")]
    Connect(String),

    /// The relay answered with a non-2xx status
    #[error("Relay returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The relay answered 2xx but the body was not what we expected
    #[error("Unexpected relay response: {0}")]
    InvalidResponse(String),

    /// Any other request failure
    #[error("Request failed: {0}")]
    Request(String),

    /// The link was stopped; no further events are sent
    #[error("Producer is shutting down")]
    ShuttingDown,
}

impl TransportError {
    /// Whether the relay answered at all.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connect(_))
    }
}

/// Failures loading or saving producer settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading or writing the settings file failed
    #[error("Settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON for [`ProducerSettings`](crate::ProducerSettings)
    #[error("Settings file is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    /// An override variable was set to something unusable
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },
}
