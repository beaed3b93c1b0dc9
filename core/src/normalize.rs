//! Payload normalization: raw POST body → [`Event`].
//!
//! Producers do not agree on how to encode the body. Some send the envelope
//! object directly:
//!
//! ```json
//! {"event": {"event": "FSDJump", "StarSystem": "Sol"}}
//! ```
//!
//! Others serialize the envelope to a string first and then send *that* as
//! JSON, so the body is a JSON string containing JSON:
//!
//! ```json
//! "{\"event\": {\"event\": \"FSDJump\", \"StarSystem\": \"Sol\"}}"
//! ```
//!
//! Normalization is two steps, each testable on its own:
//!
//! 1. [`decode_envelope`] parses the body and, if it is a JSON string, parses
//!    the string once more. The result must be a JSON object. Anything else
//!    is a [`RelayError::Decode`].
//! 2. [`extract_event`] pulls out the `event` field or fails with
//!    [`RelayError::MissingField`].

use crate::error::RelayError;
use crate::event::{Envelope, Event};
use serde_json::{Map, Value};

/// Turn a raw POST body into the event it carries.
///
/// # Errors
///
/// - [`RelayError::Decode`] if the body (or the string it wraps) is not JSON,
///   or does not decode to a JSON object.
/// - [`RelayError::MissingField`] if the object has no `event` key.
pub fn normalize(body: &[u8]) -> Result<Event, RelayError> {
    let envelope = decode_envelope(body)?;
    extract_event(envelope)
}

/// Parse a body into an envelope object, unwrapping one level of string
/// encoding.
///
/// # Errors
///
/// Returns [`RelayError::Decode`] if either parse fails or the result is not
/// an object.
pub fn decode_envelope(body: &[u8]) -> Result<Map<String, Value>, RelayError> {
    let outer: Value = serde_json::from_slice(body)
        .map_err(|e| RelayError::Decode(format!("body is not valid JSON: {e}")))?;

    let envelope = match outer {
        Value::String(inner) => serde_json::from_str(&inner).map_err(|e| {
            RelayError::Decode(format!("string payload is not valid JSON: {e}"))
        })?,
        other => other,
    };

    match envelope {
        Value::Object(map) => Ok(map),
        other => Err(RelayError::Decode(format!(
            "envelope is not a JSON object (got {})",
            kind(&other)
        ))),
    }
}

/// Pull the `event` field out of a decoded envelope.
///
/// # Errors
///
/// Returns [`RelayError::MissingField`] if there is no `event` key.
pub fn extract_event(envelope: Map<String, Value>) -> Result<Event, RelayError> {
    let envelope: Envelope = serde_json::from_value(Value::Object(envelope))
        .map_err(|e| RelayError::Decode(e.to_string()))?;
    Event::try_from(envelope)
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
