//! Journal event types and the relay wire body.
//!
//! The relay never looks inside an event. An [`Event`] wraps whatever JSON
//! value arrived under the `event` key (object, string, array, anything) and is
//! serialized back out exactly as received.
//!
//! # Wire Format
//!
//! Both GET and POST answer with the same body shape:
//!
//! ```json
//! { "event": <event> }
//! ```
//!
//! When nothing has been cached yet, `<event>` is the literal string `"None"`.
//! Existing consumers match on that string, so it is not `null`.

use crate::error::RelayError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Key the relay extracts from an envelope.
pub const EVENT_FIELD: &str = "event";

/// Value reported for `event` when the cache slot is empty.
pub const EMPTY_SENTINEL: &str = "None";

/// An opaque journal event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(Value);

impl Event {
    /// Wrap a JSON value as an event.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Unwrap into the underlying JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Event {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Typed view of a decoded POST payload.
///
/// Only `event` is recognised. Other keys (`reason`, timestamps, whatever the
/// game wrote) are accepted and dropped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    /// The journal event, if the producer sent one.
    ///
    /// `{"event": null}` is a present field with a null event, not a missing
    /// one.
    #[serde(default, deserialize_with = "present")]
    pub event: Option<Event>,
}

// Deserializes a present key (even `null`) as `Some`, leaving absent keys to
// `#[serde(default)]`.
fn present<'de, D>(deserializer: D) -> Result<Option<Event>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| Some(Event(v)))
}

impl TryFrom<Envelope> for Event {
    type Error = RelayError;

    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        envelope.event.ok_or(RelayError::MissingField(EVENT_FIELD))
    }
}

/// Body returned by both `GET` and `POST` on the journal event resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    /// The event, or the `"None"` sentinel.
    pub event: Value,
}

impl EventResponse {
    /// Response for an empty cache slot.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            event: Value::String(EMPTY_SENTINEL.to_string()),
        }
    }

    /// Response echoing a specific event.
    #[must_use]
    pub fn echo(event: &Event) -> Self {
        Self {
            event: event.as_value().clone(),
        }
    }

    /// Response for whatever the cache slot currently holds.
    #[must_use]
    pub fn from_slot<E: AsRef<Event>>(slot: Option<E>) -> Self {
        slot.map_or_else(Self::empty, |event| Self::echo(event.as_ref()))
    }

    /// Whether this is the empty-slot sentinel.
    ///
    /// An event that happens to be the string `"None"` is indistinguishable
    /// on the wire.
    #[must_use]
    pub fn is_empty_sentinel(&self) -> bool {
        self.event.as_str() == Some(EMPTY_SENTINEL)
    }
}

impl AsRef<Self> for Event {
    fn as_ref(&self) -> &Self {
        self
    }
}
