//! Producer settings and the store that persists them.
//!
//! Settings are read once at startup and again whenever the user saves the
//! preferences panel. The link itself never writes them; whoever owns the
//! panel calls [`SettingsStore::save`].

use crate::client::{DEFAULT_TIMEOUT, PayloadEncoding};
use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything the producer needs to reach the relay, plus the Discord fields
/// the preferences panel edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProducerSettings {
    /// Scheme and host of the relay, e.g. `http://127.0.0.1`
    pub target_server: String,
    /// Relay port
    pub target_port: u16,
    /// Resource name on the relay
    pub target_endpoint: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Body encoding
    pub encoding: PayloadEncoding,
    /// Discord bot fields
    pub discord: DiscordSettings,
}

impl Default for ProducerSettings {
    fn default() -> Self {
        Self {
            target_server: "http://127.0.0.1".to_string(),
            target_port: 5000,
            target_endpoint: "journalevent".to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            encoding: PayloadEncoding::default(),
            discord: DiscordSettings::default(),
        }
    }
}

impl ProducerSettings {
    /// Default settings with environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] for an unparseable override.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::default().with_overrides(|var| env::var(var).ok())
    }

    /// Apply overrides from a variable source.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `CARRIER_TARGET_SERVER` | `target_server` |
    /// | `CARRIER_TARGET_PORT` | `target_port` |
    /// | `CARRIER_TARGET_ENDPOINT` | `target_endpoint` |
    /// | `CARRIER_REQUEST_TIMEOUT_SECS` | `request_timeout_secs` |
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] for an unparseable number.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(server) = lookup("CARRIER_TARGET_SERVER") {
            self.target_server = server;
        }
        if let Some(raw) = lookup("CARRIER_TARGET_PORT") {
            self.target_port = parse(&raw, "CARRIER_TARGET_PORT")?;
        }
        if let Some(endpoint) = lookup("CARRIER_TARGET_ENDPOINT") {
            self.target_endpoint = endpoint;
        }
        if let Some(raw) = lookup("CARRIER_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = parse(&raw, "CARRIER_REQUEST_TIMEOUT_SECS")?;
        }
        Ok(self)
    }

    /// Full URL of the relay resource: `{server}:{port}/{endpoint}/`.
    #[must_use]
    pub fn target_url(&self) -> String {
        format!(
            "{}:{}/{}/",
            self.target_server.trim_end_matches('/'),
            self.target_port,
            self.target_endpoint.trim_matches('/')
        )
    }

    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse<T: std::str::FromStr>(raw: &str, var: &'static str) -> Result<T, SettingsError> {
    raw.trim().parse().map_err(|_| SettingsError::InvalidValue {
        var,
        value: raw.to_string(),
    })
}

/// Discord fields from the preferences panel.
///
/// Carried and persisted for the bot process; the relay link does not use them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordSettings {
    /// Guild name
    pub guild: String,
    /// Channel name
    pub channel_name: String,
    /// Webhook URL
    pub webhook_url: String,
    /// Bot token
    pub bot_token: String,
    /// Command prefix
    pub prefix: String,
    /// Bot description
    pub description: String,
}

impl Default for DiscordSettings {
    fn default() -> Self {
        Self {
            guild: String::new(),
            channel_name: String::new(),
            webhook_url: String::new(),
            bot_token: String::new(),
            prefix: "/".to_string(),
            description: "Carrier Commander Discord Bot".to_string(),
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for DiscordSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordSettings")
            .field("guild", &self.guild)
            .field("channel_name", &self.channel_name)
            .field("webhook_url", &redact(&self.webhook_url))
            .field("bot_token", &redact(&self.bot_token))
            .field("prefix", &self.prefix)
            .field("description", &self.description)
            .finish()
    }
}

const fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "<redacted>" }
}

/// Where producer settings live.
pub trait SettingsStore: Send + Sync {
    /// Load settings, falling back to defaults when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if stored settings exist but cannot be read.
    fn load(&self) -> Result<ProducerSettings, SettingsError>;

    /// Persist settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the settings cannot be written.
    fn save(&self, settings: &ProducerSettings) -> Result<(), SettingsError>;
}

/// Settings persisted as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<ProducerSettings, SettingsError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No settings file, using defaults");
                Ok(ProducerSettings::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, settings: &ProducerSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(settings)?;
        fs::write(&self.path, bytes)?;
        tracing::debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
