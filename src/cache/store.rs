//! In-memory TTL cache with stale reads
//!
//! Entries are never evicted; an expired entry stays readable through
//! [`TtlCache::get`] until it is overwritten or the cache is cleared. The key
//! set is bounded by the refresh plan and the per-driver keys the server
//! admits, so the map cannot grow without limit.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::clock::{Clock, SystemClock};

/// Shortest lifetime an entry can have, so `expires_at > written_at` holds.
const MIN_TTL: Duration = Duration::from_millis(1);

/// A stored value with its write and expiry timestamps
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub value: Value,
    pub written_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// An entry is fresh up to and including its expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Process-wide key/value cache with per-entry expiry.
///
/// All operations are synchronous and hold the lock only for a single map
/// access, so callers on the async runtime never suspend on the cache.
pub struct TtlCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TtlCache {
    /// Create an empty cache on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty cache on a custom clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Store a value, replacing whatever was under `key`.
    pub fn set(&self, key: impl Into<String>, value: Value, ttl: Duration) {
        let written_at = self.clock.now();
        let ttl = chrono::Duration::from_std(ttl.max(MIN_TTL)).unwrap_or(chrono::Duration::MAX);
        let expires_at = written_at
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let entry = CacheEntry {
            value,
            written_at,
            expires_at,
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), entry);
    }

    /// Serialize and store a typed value.
    pub fn set_serialized<T: Serialize>(
        &self,
        key: impl Into<String>,
        data: &T,
        ttl: Duration,
    ) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(data)?;
        self.set(key, value, ttl);
        Ok(())
    }

    /// Value under `key` whether or not it has expired.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entry(key).map(|entry| entry.value)
    }

    /// Value under `key` only while it is within its TTL.
    pub fn get_fresh(&self, key: &str) -> Option<Value> {
        let now = self.clock.now();
        self.entry(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.value)
    }

    /// Stale read deserialized into `T`; a shape mismatch reads as absent.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| serde_json::from_value(v).ok())
    }

    /// Fresh read deserialized into `T`.
    #[allow(dead_code)]
    pub fn get_fresh_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_fresh(key).and_then(|v| serde_json::from_value(v).ok())
    }

    /// True when the key is absent or past its expiry.
    pub fn is_stale(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.entry(key).is_none_or(|entry| entry.is_expired_at(now))
    }

    /// Snapshot of the full entry, including timestamps.
    pub fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Current time on the cache's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
