//! Time-to-live response cache.
//!
//! Entries expire a fixed duration after insertion. Expiry is evaluated
//! lazily on lookup; [`TtlCache::purge_expired`] exists for an optional
//! background sweep and does not change what readers observe.

use crate::clock::Clock;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// String-keyed cache whose entries expire `ttl` after insertion.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    /// Returns the value stored under `key` if it is younger than the TTL.
    ///
    /// An expired entry found here is removed.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        {
            let entry = self.entries.get(key)?;
            if !self.is_expired(&entry, now) {
                return Some(entry.value.clone());
            }
        }
        self.entries
            .remove_if(key, |_, entry| self.is_expired(entry, now));
        None
    }

    /// Stores `value` under `key`, replacing any previous entry and
    /// restarting its lifetime.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                inserted_at: self.clock.now(),
            },
        );
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !self.is_expired(entry, now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of stored entries, expired ones included until purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured entry lifetime.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_expired(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) >= self.ttl
    }
}
