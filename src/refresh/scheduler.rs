//! Periodic refresh driver

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use log::{info, warn};
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{RefreshReport, RefreshTask, TaskOutcome, TaskStatus};
use crate::cache::TtlCache;

/// Shortest accepted interval between cycles
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Runs the refresh plan against the shared cache
pub struct RefreshScheduler {
    cache: Arc<TtlCache>,
    tasks: Vec<RefreshTask>,
    interval: Duration,
}

impl RefreshScheduler {
    pub fn new(cache: Arc<TtlCache>, tasks: Vec<RefreshTask>, interval: Duration) -> Self {
        Self {
            cache,
            tasks,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    pub fn tasks(&self) -> &[RefreshTask] {
        &self.tasks
    }

    /// Run every task once, concurrently.
    ///
    /// Each task is its own tokio task, so a panic or a slow upstream only
    /// affects its own key. Returns after all tasks settle.
    pub async fn run_refresh_cycle(&self) -> RefreshReport {
        info!("Refresh cycle starting ({} tasks)", self.tasks.len());

        let handles: Vec<_> = self
            .tasks
            .iter()
            .cloned()
            .map(|task| tokio::spawn(run_task(self.cache.clone(), task)))
            .collect();

        let results = join_all(handles).await;

        let outcomes: Vec<TaskOutcome> = self
            .tasks
            .iter()
            .zip(results)
            .map(|(task, joined)| match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Refresh of {} aborted, keeping stale: {}", task.key, e);
                    TaskOutcome {
                        key: task.key.clone(),
                        status: TaskStatus::KeptStale {
                            reason: format!("task aborted: {}", e),
                        },
                        elapsed_ms: 0,
                    }
                }
            })
            .collect();

        let report = RefreshReport { outcomes };
        info!(
            "Refresh cycle complete: {} refreshed, {} kept stale",
            report.refreshed(),
            report.kept_stale()
        );
        report
    }

    /// Spawn the periodic loop. The first cycle runs immediately.
    ///
    /// Every tick spawns its cycle without waiting for the previous one, so a
    /// slow upstream never delays the schedule. Abort the handle to stop
    /// scheduling further cycles.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(
                "Refresh scheduler started (every {}s)",
                self.interval.as_secs()
            );

            loop {
                ticker.tick().await;
                let scheduler = self.clone();
                tokio::spawn(async move {
                    scheduler.run_refresh_cycle().await;
                });
            }
        })
    }
}

async fn run_task(cache: Arc<TtlCache>, task: RefreshTask) -> TaskOutcome {
    let started = Instant::now();
    let result = task.fetch().await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let status = match result {
        Ok(Value::Null) => {
            warn!("No data for {}, keeping stale", task.key);
            TaskStatus::KeptStale {
                reason: "no data".to_string(),
            }
        }
        Ok(value) => {
            cache.set(task.key.clone(), value, task.ttl);
            info!("Refreshed: {}", task.key);
            TaskStatus::Refreshed
        }
        Err(e) => {
            warn!("Refresh of {} failed, keeping stale: {}", task.key, e);
            TaskStatus::KeptStale {
                reason: e.to_string(),
            }
        }
    };

    TaskOutcome {
        key: task.key,
        status,
        elapsed_ms,
    }
}
