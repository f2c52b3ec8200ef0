// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Short-lived cache of poll responses.
//!
//! Reading several properties in a burst would otherwise hit the panel once
//! per property. Entries are reused while their age is at most the TTL and
//! replaced on the next read after that; nothing is evicted eagerly.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clock::Clock;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    fetched_at: Instant,
}

/// Per-key TTL cache.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use lupusec_lib::cache::PollingCache;
/// use lupusec_lib::clock::ManualClock;
///
/// let clock = ManualClock::new();
/// let mut cache = PollingCache::new(Duration::from_secs(2), Arc::new(clock.clone()));
///
/// cache.insert("panel", 1);
/// assert_eq!(cache.get(&"panel"), Some(&1));
///
/// clock.advance(Duration::from_secs(3));
/// assert_eq!(cache.get(&"panel"), None);
/// ```
#[derive(Debug)]
pub struct PollingCache<K, V> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V> PollingCache<K, V> {
    /// Default lifetime of a cached response.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(2);

    /// Creates an empty cache.
    #[must_use]
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: HashMap::new(),
        }
    }

    /// Returns the configured TTL.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the value for `key` if it is still fresh.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let entry = self.entries.get(key)?;
        self.is_entry_fresh(entry).then_some(&entry.value)
    }

    /// Stores a value fetched now, replacing any previous entry.
    pub fn insert(&mut self, key: K, value: V) {
        let fetched_at = self.clock.now();
        self.entries.insert(key, Entry { value, fetched_at });
    }

    /// Returns how long ago the entry for `key` was fetched.
    #[must_use]
    pub fn age(&self, key: &K) -> Option<Duration> {
        self.entries
            .get(key)
            .map(|entry| self.clock.now().saturating_duration_since(entry.fetched_at))
    }

    /// Returns true if `key` has an entry that may still be served.
    #[must_use]
    pub fn is_fresh(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of stored entries, fresh or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was ever stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_entry_fresh(&self, entry: &Entry<V>) -> bool {
        self.clock.now().saturating_duration_since(entry.fetched_at) <= self.ttl
    }
}

impl<K: Eq + Hash, V: Clone> PollingCache<K, V> {
    /// Returns the cached value for `key`, or awaits `fetch` and caches its
    /// result.
    ///
    /// A failed fetch leaves the previous entry in place.
    ///
    /// # Errors
    ///
    /// Returns whatever error `fetch` produces.
    pub async fn get_or_fetch<F, Fut, E>(&mut self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value.clone());
        }

        let value = fetch().await?;
        self.insert(key, value.clone());
        Ok(value)
    }
}
