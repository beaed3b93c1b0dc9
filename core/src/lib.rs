//! # Carrier Relay Core
//!
//! The protocol core of the journal event relay: turning a POST body into an
//! [`Event`], and holding the most recently accepted event in a single slot.
//!
//! ## Data Flow
//!
//! ```text
//! POST body ──► normalize ──► Event ──► EventCache::put
//!                  │
//!                  └─► RelayError (400)      GET ──► EventCache::get ──► EventResponse
//! ```
//!
//! ## Example
//!
//! ```
//! use carrier_relay_core::{normalize, EventCache, EventResponse};
//!
//! let cache = EventCache::new();
//! assert_eq!(EventResponse::from_slot(cache.get()), EventResponse::empty());
//!
//! let event = normalize(br#"{"event": {"foo": "bar"}}"#).unwrap();
//! cache.put(event.clone());
//!
//! assert_eq!(cache.get().as_deref(), Some(&event));
//! ```
//!
//! Nothing in this crate performs I/O. The HTTP shell lives in
//! `carrier-relay-web`, the sending side in `carrier-relay-producer`.

pub mod cache;
pub mod error;
pub mod event;
pub mod normalize;

pub use cache::{CachedEvent, EventCache};
pub use error::RelayError;
pub use event::{EMPTY_SENTINEL, EVENT_FIELD, Envelope, Event, EventResponse};
pub use normalize::{decode_envelope, extract_event, normalize};
