//! Cache-or-fetch adapter for the request path
//!
//! Any cached copy, fresh or expired, is served as-is. Freshness is the
//! refresh scheduler's job; request handlers never revalidate, so a caller
//! only waits on upstream when the key has never been populated.

use std::future::Future;
use std::sync::Arc;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CacheTtl, TtlCache};
use crate::error::{Error, Result};

/// Where a served value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Read from the cache (possibly expired)
    Cached,
    /// Fetched from upstream during this request
    Fresh,
}

/// A value together with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct Served<T> {
    pub data: T,
    pub provenance: Provenance,
}

impl<T> Served<T> {
    pub fn is_cached(&self) -> bool {
        self.provenance == Provenance::Cached
    }
}

/// Request-time cache lookup with synchronous fetch on miss.
#[derive(Clone)]
pub struct CacheOrFetch {
    cache: Arc<TtlCache>,
    ttl: CacheTtl,
}

impl CacheOrFetch {
    pub fn new(cache: Arc<TtlCache>, ttl: CacheTtl) -> Self {
        Self { cache, ttl }
    }

    /// The underlying cache
    pub fn cache(&self) -> &Arc<TtlCache> {
        &self.cache
    }

    /// Return the cached `T` under `key`, or fetch, store and return it.
    ///
    /// A cached value that no longer deserializes into `T` counts as a miss.
    /// A failed fetch on a miss becomes [`Error::Unavailable`], and so does a
    /// fetch that yields `null`, which is never cached.
    pub async fn get_or_fetch_as<T, F, Fut>(&self, key: &str, fetch: F) -> Result<Served<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(data) = self.cache.get_as::<T>(key) {
            debug!("Cache hit: {}", key);
            return Ok(Served {
                data,
                provenance: Provenance::Cached,
            });
        }

        debug!("Cache miss: {}, fetching", key);
        let data = match fetch().await {
            Ok(data) => data,
            Err(err) => {
                warn!("Fetch for {} failed with nothing cached: {}", key, err);
                return Err(Error::Unavailable(key.to_string()));
            }
        };

        match serde_json::to_value(&data) {
            Ok(Value::Null) => {
                warn!("Fetch for {} returned no data with nothing cached", key);
                return Err(Error::Unavailable(key.to_string()));
            }
            Ok(value) => self.cache.set(key, value, self.ttl.for_key(key)),
            Err(err) => warn!("Could not cache {}: {}", key, err),
        }

        Ok(Served {
            data,
            provenance: Provenance::Fresh,
        })
    }
}
