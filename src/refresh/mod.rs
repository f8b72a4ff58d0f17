//! Background cache refresh
//!
//! A fixed set of [`RefreshTask`]s is run once at startup and then on every
//! tick. Each task writes its own key as soon as its fetch succeeds; a
//! failed task leaves whatever was cached before in place.

mod plan;
mod scheduler;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

pub use plan::refresh_plan;
pub use scheduler::RefreshScheduler;

/// Boxed fetch operation producing the JSON to cache
pub type FetchFn = Arc<dyn Fn() -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// A named fetch whose result is cached under `key` for `ttl`
#[derive(Clone)]
pub struct RefreshTask {
    pub key: String,
    pub ttl: Duration,
    fetch: FetchFn,
}

impl RefreshTask {
    pub fn new<F, Fut>(key: impl Into<String>, ttl: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        Self {
            key: key.into(),
            ttl,
            fetch: Arc::new(move || Box::pin(fetch())),
        }
    }

    /// Task whose fetch returns a typed value, serialized before caching.
    pub fn typed<T, F, Fut>(key: impl Into<String>, ttl: Duration, fetch: F) -> Self
    where
        T: Serialize + Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self::new(key, ttl, move || {
            let fut = fetch();
            async move {
                let data = fut.await?;
                Ok::<_, Error>(serde_json::to_value(data)?)
            }
        })
    }

    /// Start one fetch
    pub fn fetch(&self) -> BoxFuture<'static, Result<Value>> {
        (self.fetch)()
    }
}

impl fmt::Debug for RefreshTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshTask")
            .field("key", &self.key)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// What happened to one key during a cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskStatus {
    Refreshed,
    /// The previous entry (if any) was left untouched
    KeptStale { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutcome {
    pub key: String,
    #[serde(flatten)]
    pub status: TaskStatus,
    /// Wall time spent on the fetch, in milliseconds
    pub elapsed_ms: u64,
}

impl TaskOutcome {
    pub fn is_refreshed(&self) -> bool {
        self.status == TaskStatus::Refreshed
    }
}

/// Per-task outcomes of one refresh cycle, in plan order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    pub outcomes: Vec<TaskOutcome>,
}

impl RefreshReport {
    pub fn refreshed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_refreshed()).count()
    }

    pub fn kept_stale(&self) -> usize {
        self.outcomes.len() - self.refreshed()
    }

    #[allow(dead_code)]
    pub fn outcome(&self, key: &str) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|o| o.key == key)
    }
}
