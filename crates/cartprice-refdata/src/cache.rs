//! # TTL Cache
//!
//! A small thread-safe map whose entries expire after a time-to-live.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get_or_insert_with(key, load)                                          │
//! │       │                                                                 │
//! │       ├── fresh entry? ──► clone and return                             │
//! │       │                                                                 │
//! │       └── missing / expired                                             │
//! │              │   (lock released)                                        │
//! │              ▼                                                          │
//! │           load() ──► insert(key, value, now + ttl) ──► return           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The loader runs outside the lock. Two threads missing the same key at
//! once may both load it; the last insert wins. Reference data is safe to
//! reload, so no single-flight bookkeeping is kept.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Thread-safe key/value cache with per-entry expiry.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, Entry<V>>>,
    default_ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates an empty cache whose entries live for `default_ttl`.
    pub fn new(default_ttl: Duration) -> Self {
        TtlCache {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns a clone of the value if present and not expired.
    ///
    /// Expired entries are dropped on the way out.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.lock();

        match entries.get(key) {
            Some(entry) if entry.is_fresh(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a value with the default TTL.
    pub fn insert(&self, key: K, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl);
    }

    /// Stores a value with an explicit TTL.
    pub fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.lock().insert(key, Entry { value, expires_at });
    }

    /// Returns the cached value, or computes, stores and returns it.
    pub fn get_or_insert_with<F>(&self, key: K, load: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }

        let value = load();
        self.insert(key, value.clone());
        value
    }

    /// Drops one entry.
    pub fn invalidate(&self, key: &K) {
        self.lock().remove(key);
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, expired ones included until next touched.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave the map half-written, so a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<K, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
