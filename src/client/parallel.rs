//! Bounded-concurrency fan-out that settles every job.
//!
//! Unlike `try_join_all`, a failing job never cancels its siblings: each
//! job's result is returned in its input slot.

use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use crate::error::Result;

/// Type alias for boxed futures tagged with their input index
type JobFuture<T> = Pin<Box<dyn Future<Output = (usize, Result<T>)> + Send>>;

/// Run all `jobs`, at most `max_concurrent` at a time, and collect every
/// outcome.
///
/// # Returns
///
/// One result per job, in the order the jobs were given.
///
/// # Example
///
/// ```ignore
/// let feeds = settle_all(
///     sources.iter().map(|s| client.fetch_feed(s)).collect(),
///     4,
/// ).await;
/// let articles: Vec<_> = feeds.into_iter().filter_map(|r| r.ok()).flatten().collect();
/// ```
pub async fn settle_all<T, Fut>(jobs: Vec<Fut>, max_concurrent: usize) -> Vec<Result<T>>
where
    T: Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    if jobs.is_empty() {
        return Vec::new();
    }

    let total = jobs.len();
    let max_concurrent = max_concurrent.max(1);
    debug!("Settling {} jobs with max {} concurrent", total, max_concurrent);

    let mut slots: Vec<Option<Result<T>>> = (0..total).map(|_| None).collect();
    let mut running: FuturesUnordered<JobFuture<T>> = FuturesUnordered::new();
    let mut pending = jobs.into_iter().enumerate();

    let make_future = |index: usize, job: Fut| -> JobFuture<T> {
        Box::pin(async move { (index, job.await) })
    };

    for (index, job) in pending.by_ref().take(max_concurrent) {
        running.push(make_future(index, job));
    }

    while let Some((index, result)) = running.next().await {
        if let Err(e) = &result {
            debug!("Job {} failed: {}", index, e);
        }
        slots[index] = Some(result);

        if let Some((next_index, job)) = pending.next() {
            running.push(make_future(next_index, job));
        }
    }

    slots.into_iter().flatten().collect()
}
