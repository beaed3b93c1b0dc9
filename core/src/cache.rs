//! The single-slot event cache.
//!
//! Holds the most recently accepted event and nothing else: no history, no
//! TTL. A fresh cache is empty; every `put` overwrites; `get` never mutates.
//!
//! # Concurrency
//!
//! The slot is one `RwLock` around the current `Arc<CachedEvent>` and the put
//! counter. The event itself is moved into its `Arc` before the lock is
//! taken; inside the write lock a put only stamps the sequence number and
//! acceptance time and swaps the pointer, so readers only ever see a complete
//! event. The last `put` to take the write lock wins, and `accepted_at` never
//! goes backwards as `sequence` goes up.

use crate::event::Event;
use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};

/// An event as it sits in the slot.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedEvent {
    /// The accepted event.
    pub event: Arc<Event>,
    /// When the relay accepted it.
    pub accepted_at: DateTime<Utc>,
    /// Position in the total order of puts, starting at 1.
    pub sequence: u64,
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<Arc<CachedEvent>>,
    puts: u64,
}

/// Single-slot cache for the latest journal event.
///
/// Shared between request handlers behind an `Arc`; all methods take `&self`.
#[derive(Debug, Default)]
pub struct EventCache {
    slot: RwLock<Slot>,
}

impl EventCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot contents with `event`.
    ///
    /// Returns the sequence number assigned to this put.
    pub fn put(&self, event: Event) -> u64 {
        let event = Arc::new(event);

        // A poisoned lock still guards a consistent slot: the only write is
        // the assignment below.
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        slot.puts += 1;
        let sequence = slot.puts;
        let accepted_at = Utc::now();
        slot.current = Some(Arc::new(CachedEvent {
            event,
            accepted_at,
            sequence,
        }));
        sequence
    }

    /// The current event, or `None` if nothing was ever put.
    #[must_use]
    pub fn get(&self) -> Option<Arc<Event>> {
        self.snapshot().map(|cached| Arc::clone(&cached.event))
    }

    /// The current slot including its metadata.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<CachedEvent>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    /// Whether no event has been accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread;

    fn event(n: i64) -> Event {
        Event::new(json!({ "n": n }))
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = EventCache::new();
        assert!(cache.is_empty());
        assert!(cache.get().is_none());
        assert!(cache.snapshot().is_none());
    }

    #[test]
    fn test_put_then_get() {
        let cache = EventCache::new();
        cache.put(event(1));
        assert_eq!(cache.get().as_deref(), Some(&event(1)));
    }

    #[test]
    fn test_last_write_wins() {
        let cache = EventCache::new();
        assert_eq!(cache.put(event(1)), 1);
        assert_eq!(cache.put(event(2)), 2);
        assert_eq!(cache.get().as_deref(), Some(&event(2)));
        assert_eq!(cache.snapshot().unwrap().sequence, 2);
    }

    #[test]
    fn test_get_is_repeatable() {
        let cache = EventCache::new();
        cache.put(event(7));
        let first = cache.get();
        let second = cache.get();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_puts_leave_one_complete_event() {
        let cache = Arc::new(EventCache::new());
        let handles: Vec<_> = (0..16)
            .map(|n| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.put(event(n)))
            })
            .collect();

        let mut sequences: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        sequences.sort_unstable();
        assert_eq!(sequences, (1..=16).collect::<Vec<_>>());

        let last = cache.snapshot().unwrap();
        assert_eq!(last.sequence, 16);
        let n = last.event.as_value()["n"].as_i64().unwrap();
        assert!((0..16).contains(&n));
    }

    #[test]
    fn test_accepted_at_follows_sequence() {
        let cache = Arc::new(EventCache::new());
        let observed = Arc::new(std::sync::Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let cache = Arc::clone(&cache);
                let observed = Arc::clone(&observed);
                thread::spawn(move || {
                    for i in 0..50 {
                        cache.put(event(n * 100 + i));
                        let snap = cache.snapshot().unwrap();
                        observed.lock().unwrap().push((snap.sequence, snap.accepted_at));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut seen = observed.lock().unwrap().clone();
        seen.sort_unstable_by_key(|(sequence, _)| *sequence);
        assert!(
            seen.windows(2).all(|w| w[0].1 <= w[1].1),
            "a later put carried an earlier timestamp"
        );
        assert_eq!(cache.snapshot().unwrap().sequence, 400);
    }
}
