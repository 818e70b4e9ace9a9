//! Bounded worker pool: every task is submitted up front, at most `workers`
//! run at once, and outcomes are aggregated in completion order.

use anyhow::{Context, Result};
use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::{FetchOutcome, Fetcher};
use crate::config::FetchConfig;
use crate::manifest::Task;

/// Aggregate counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: u32,
    pub failed: u32,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn total(&self) -> u32 {
        self.succeeded + self.failed
    }

    fn record(&mut self, outcome: &FetchOutcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Downloads `tasks` using the configured output directory, timeout, retry
/// policy and worker count.
pub async fn run_tasks(cfg: &FetchConfig, tasks: Vec<Task>) -> Result<RunSummary> {
    let fetcher = Arc::new(Fetcher::from_config(cfg));
    run_with_fetcher(fetcher, tasks, cfg.worker_count()).await
}

/// Runs every task through `fetcher` with up to `workers` downloads in flight.
///
/// Creates the output directory first. Individual task failures (including a
/// panicked worker) are counted, never returned as errors.
pub async fn run_with_fetcher(
    fetcher: Arc<Fetcher>,
    tasks: Vec<Task>,
    workers: usize,
) -> Result<RunSummary> {
    let workers = workers.max(1);
    let output_dir = fetcher.output_dir();
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let started = Instant::now();
    tracing::info!(
        "Starting download of {} files with {} threads",
        tasks.len(),
        workers
    );

    let permits = Arc::new(Semaphore::new(workers));
    let mut join_set = JoinSet::new();
    for task in tasks {
        let permits = Arc::clone(&permits);
        let fetcher = Arc::clone(&fetcher);
        join_set.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .context("worker semaphore closed")?;
            tokio::task::spawn_blocking(move || fetcher.fetch(&task))
                .await
                .context("download worker")
        });
    }

    let mut summary = RunSummary::default();
    while let Some(res) = join_set.join_next().await {
        match res {
            Ok(Ok(outcome)) => summary.record(&outcome),
            Ok(Err(e)) => {
                tracing::error!("Download task aborted: {:#}", e);
                summary.failed += 1;
            }
            Err(e) => {
                tracing::error!("Download task join: {}", e);
                summary.failed += 1;
            }
        }
    }
    summary.elapsed = started.elapsed();

    tracing::info!(
        "Download complete. Success: {}, Failed: {}",
        summary.succeeded,
        summary.failed
    );
    tracing::info!(
        "Download phase took {:.2} seconds",
        summary.elapsed.as_secs_f64()
    );
    Ok(summary)
}
