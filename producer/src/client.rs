//! HTTP client for the relay's journal event resource.

use crate::{error::TransportError, settings::ProducerSettings};
use carrier_relay_core::EventResponse;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// How the envelope is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadEncoding {
    /// Send the envelope object as the JSON body.
    Plain,
    /// Serialize the envelope to a string and send that string as JSON.
    ///
    /// This is what deployed game plugins send, so it is the default.
    #[default]
    DoubleEncoded,
}

/// The relay's answer to a successful POST.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Acknowledgement {
    /// The event the relay accepted.
    pub event: Value,
    /// Free-form message, if the relay sent one.
    #[serde(default)]
    pub msg: Option<String>,
    /// Message code, if the relay sent one.
    #[serde(default)]
    pub msgnum: Option<i64>,
}

/// Relay client.
///
/// Each call is a single request bounded by the configured timeout. There is
/// no retry; failures are returned as [`TransportError`].
#[derive(Clone, Debug)]
pub struct RelayClient {
    client: Client,
    url: Url,
    timeout: Duration,
    encoding: PayloadEncoding,
}

impl RelayClient {
    /// Create a client for the journal event resource at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] if `url` does not parse, or
    /// [`TransportError::Request`] if the HTTP client cannot be built.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let parsed = Url::parse(url).map_err(|e| TransportError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: parsed,
            timeout,
            encoding: PayloadEncoding::default(),
        })
    }

    /// Create a client from producer settings.
    ///
    /// # Errors
    ///
    /// Same as [`RelayClient::new`].
    pub fn from_settings(settings: &ProducerSettings) -> Result<Self, TransportError> {
        Ok(Self::new(&settings.target_url(), settings.request_timeout())?
            .with_encoding(settings.encoding))
    }

    /// Choose how envelopes are encoded.
    #[must_use]
    pub fn with_encoding(mut self, encoding: PayloadEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// The resource URL this client posts to.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// The per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one journal entry to the relay.
    ///
    /// `entry` is the envelope: the relay stores whatever sits under its
    /// `event` key.
    ///
    /// # Errors
    ///
    /// Timeouts, connection failures, non-2xx answers, and unparseable
    /// acknowledgements are all returned as [`TransportError`].
    pub async fn submit(&self, entry: &Value) -> Result<Acknowledgement, TransportError> {
        let request = match self.encoding {
            PayloadEncoding::Plain => self.client.post(self.url.clone()).json(entry),
            PayloadEncoding::DoubleEncoded => self
                .client
                .post(self.url.clone())
                .json(&Value::String(entry.to_string())),
        };

        let response = request.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "Relay refused event");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let ack = response
            .json::<Acknowledgement>()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        tracing::debug!(event = %ack.event, "Relay acknowledged event");
        Ok(ack)
    }

    /// Fetch the event the relay currently holds.
    ///
    /// Returns `None` when the relay reports its empty sentinel.
    ///
    /// # Errors
    ///
    /// Same classes of failure as [`RelayClient::submit`].
    pub async fn last_event(&self) -> Result<Option<Value>, TransportError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .json::<EventResponse>()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        if body.is_empty_sentinel() {
            Ok(None)
        } else {
            Ok(Some(body.event))
        }
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}
