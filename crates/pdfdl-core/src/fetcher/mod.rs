//! Concurrent fetcher.
//!
//! Each [`Task`] is downloaded with a bounded retry loop, validated as a PDF
//! and written under the output directory. [`run_tasks`] runs all tasks with
//! a fixed concurrency cap and aggregates the outcomes.

mod http;
mod pool;
mod storage;

pub use http::{http_get, validate_pdf};
pub use pool::{run_tasks, run_with_fetcher, RunSummary};
pub use storage::write_atomically;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::FetchConfig;
use crate::manifest::Task;
use crate::retry::{run_with_retry, FetchError, RetryPolicy};

/// Result of one task after its retry loop finished.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Payload written; `attempts` is 1-based.
    Success { bytes: u64, attempts: u32 },
    /// Every attempt failed (or storage failed); no file was written.
    Failure { attempts: u32, error: FetchError },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            FetchOutcome::Success { attempts, .. } | FetchOutcome::Failure { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Downloads single tasks. Shared read-only across workers.
#[derive(Debug, Clone)]
pub struct Fetcher {
    output_dir: PathBuf,
    timeout: Duration,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(output_dir: impl Into<PathBuf>, timeout: Duration, policy: RetryPolicy) -> Self {
        Self {
            output_dir: output_dir.into(),
            timeout,
            policy,
        }
    }

    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self::new(cfg.output_dir.clone(), cfg.timeout(), cfg.retry_policy())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn target_path(&self, task: &Task) -> PathBuf {
        self.output_dir.join(&task.local_filename)
    }

    /// Runs the retry loop for one task. Blocks; never panics on network or disk errors.
    pub fn fetch(&self, task: &Task) -> FetchOutcome {
        let target = self.target_path(task);
        let mut attempts = 0u32;
        let result = run_with_retry(
            &self.policy,
            |attempt| {
                attempts = attempt;
                let body = http_get(&task.remote_url, self.timeout)?;
                validate_pdf(&body)?;
                write_atomically(&target, &body)?;
                Ok(body.len() as u64)
            },
            |attempt, e| {
                tracing::warn!(
                    "Attempt {} failed for {}: {}. Retrying...",
                    attempt,
                    task.remote_url,
                    e
                );
            },
        );

        match result {
            Ok(bytes) => {
                tracing::info!("Successfully downloaded: {}", target.display());
                FetchOutcome::Success { bytes, attempts }
            }
            Err(error) => {
                tracing::error!(
                    "Failed to download {} after {} attempts: {}",
                    task.remote_url,
                    attempts,
                    error
                );
                FetchOutcome::Failure { attempts, error }
            }
        }
    }
}
