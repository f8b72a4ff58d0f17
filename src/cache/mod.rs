//! In-memory response cache
//!
//! Provides the TTL store shared by the refresh scheduler and the request
//! path, plus the cache-or-fetch adapter used by route handlers.

pub mod adapter;
pub mod clock;
pub mod key;
pub mod store;

use std::time::Duration;

use crate::config::TtlConfig;

/// Cache TTL per data kind
///
/// Upstream volatility differs: the calendar barely changes, standings and
/// results move after every session, and news turns over quickly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    pub schedule: Duration,
    pub standings: Duration,
    pub results: Duration,
    pub news: Duration,
    pub driver: Duration,
    pub meetings: Duration,
}

impl CacheTtl {
    /// Lifetime for keys outside the known set
    pub const FALLBACK: Duration = Duration::from_secs(5 * 60); // 5 min

    /// TTL to apply when `key` is populated on a cache miss
    pub fn for_key(&self, key: &str) -> Duration {
        match key {
            key::SCHEDULE => self.schedule,
            key::DRIVER_STANDINGS | key::CONSTRUCTOR_STANDINGS => self.standings,
            key::LAST_RACE_RESULTS => self.results,
            key::NEWS => self.news,
            key::MEETINGS => self.meetings,
            k if key::is_driver_key(k) => self.driver,
            _ => Self::FALLBACK,
        }
    }
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self::from(&TtlConfig::default())
    }
}

impl From<&TtlConfig> for CacheTtl {
    fn from(cfg: &TtlConfig) -> Self {
        Self {
            schedule: Duration::from_secs(cfg.schedule),
            standings: Duration::from_secs(cfg.standings),
            results: Duration::from_secs(cfg.results),
            news: Duration::from_secs(cfg.news),
            driver: Duration::from_secs(cfg.driver),
            meetings: Duration::from_secs(cfg.meetings),
        }
    }
}

// Re-export main types
pub use adapter::{CacheOrFetch, Provenance, Served};
pub use store::{CacheEntry, TtlCache};
