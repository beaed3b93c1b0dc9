//! Relay error taxonomy.
//!
//! Every failure the relay reports to a caller is one of these. None of them
//! touch the cache: they are raised before a `put` happens.

use thiserror::Error;

/// Errors raised while handling a relay request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Body is not valid JSON, or the double-encoded string did not unwrap
    /// into a JSON object.
    #[error("Malformed payload: {0}")]
    Decode(String),

    /// The envelope decoded fine but has no `event` key.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// No resource is registered for the requested path.
    #[error("No resource at {0}")]
    RouteNotFound(String),
}

impl RelayError {
    /// HTTP status code this error surfaces as.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Decode(_) | Self::MissingField(_) => 400,
            Self::RouteNotFound(_) => 404,
        }
    }

    /// Stable machine-readable code for clients.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "DECODE_ERROR",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::RouteNotFound(_) => "ROUTE_NOT_FOUND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RelayError::MissingField("event");
        assert_eq!(err.to_string(), "Missing required field: event");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(RelayError::Decode("x".into()).status_code(), 400);
        assert_eq!(RelayError::MissingField("event").status_code(), 400);
        assert_eq!(RelayError::RouteNotFound("/nope/".into()).status_code(), 404);
    }

    #[test]
    fn test_codes() {
        assert_eq!(RelayError::Decode(String::new()).code(), "DECODE_ERROR");
        assert_eq!(RelayError::MissingField("event").code(), "MISSING_FIELD");
        assert_eq!(
            RelayError::RouteNotFound(String::new()).code(),
            "ROUTE_NOT_FOUND"
        );
    }
}
