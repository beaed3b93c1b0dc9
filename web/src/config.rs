//! Server configuration.
//!
//! Loaded from environment variables with defaults that match the port the
//! Carrier producer targets out of the box.
//!
//! | Variable | Default |
//! |---|---|
//! | `RELAY_HOST` | `127.0.0.1` |
//! | `RELAY_PORT` | `5000` |
//! | `RELAY_LOG` | `carrier_relay=info,carrier_relay_web=info,tower_http=info` |
//! | `RELAY_MAX_BODY_BYTES` | `1048576` |

use crate::state::DEFAULT_BODY_LIMIT;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value that failed to parse
        value: String,
    },
}

/// Relay server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Largest accepted POST body in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            log_filter: "carrier_relay=info,carrier_relay_web=info,tower_http=info".to_string(),
            max_body_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a numeric variable is set to
    /// something that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("RELAY_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "RELAY_PORT", defaults.port)?,
            log_filter: lookup("RELAY_LOG").unwrap_or(defaults.log_filter),
            max_body_bytes: parse_or(&lookup, "RELAY_MAX_BODY_BYTES", defaults.max_body_bytes)?,
        })
    }

    /// `host:port` string for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
    }
}
