use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Archive endpoint the manifest paths are relative to.
pub const DEFAULT_BASE_URL: &str = "http://imagem.sian.an.gov.br/acervo/derivadas";

/// Every fetched payload must start with this marker.
pub const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Retry policy parameters (optional `[retry]` section in the config file).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per task (including the first).
    pub max_attempts: u32,
    /// Fixed delay in seconds between attempts (e.g. 0.5 = 500ms).
    pub delay_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_secs: 2.0,
        }
    }
}

/// Error from [`FetchConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base_url {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base_url must be http or https, got scheme {0:?}")]
    Scheme(String),
    #[error("extension must be non-empty and start with '.', got {0:?}")]
    Extension(String),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("retry.delay_secs must be a finite, non-negative number, got {0}")]
    Delay(f64),
}

/// Run configuration shared by the enumerator and the fetcher.
///
/// `Default` holds the built-in constants; a TOML file passed with
/// `--config` can override any of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Prefix every manifest path segment is appended to (verbatim).
    pub base_url: String,
    /// Directory holding `*.txt` / `*.json` manifests.
    pub manifest_dir: PathBuf,
    /// Directory fetched files are written to.
    pub output_dir: PathBuf,
    /// Directory for per-run log files.
    pub log_dir: PathBuf,
    /// Required suffix of every local filename.
    pub extension: String,
    /// Upper bound on concurrent downloads.
    pub max_workers: usize,
    /// Total timeout for a single GET, in seconds.
    pub timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    pub retry: Option<RetryConfig>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            manifest_dir: PathBuf::from("txt"),
            output_dir: PathBuf::from("pdfs"),
            log_dir: PathBuf::from("logs"),
            extension: ".pdf".to_string(),
            max_workers: 10,
            timeout_secs: 15,
            retry: None,
        }
    }
}

impl FetchConfig {
    /// Number of concurrent downloads: `min(max_workers, 2 × available parallelism)`.
    pub fn worker_count(&self) -> usize {
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        self.max_workers.min(cpus.saturating_mul(2)).max(1)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let retry = self.retry.clone().unwrap_or_default();
        RetryPolicy {
            max_attempts: retry.max_attempts,
            delay: Duration::try_from_secs_f64(retry.delay_secs).unwrap_or(Duration::ZERO),
        }
    }

    /// Builds the remote URL for a manifest path segment.
    pub fn remote_url(&self, segment: &str) -> String {
        format!("{}{}", self.base_url, segment)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.base_url).map_err(|source| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::Scheme(parsed.scheme().to_string()));
        }
        if self.extension.len() < 2 || !self.extension.starts_with('.') {
            return Err(ConfigError::Extension(self.extension.clone()));
        }
        if self.max_workers == 0 {
            return Err(ConfigError::Zero("max_workers"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Zero("timeout_secs"));
        }
        if let Some(retry) = &self.retry {
            if retry.max_attempts == 0 {
                return Err(ConfigError::Zero("retry.max_attempts"));
            }
            if !retry.delay_secs.is_finite() || retry.delay_secs < 0.0 {
                return Err(ConfigError::Delay(retry.delay_secs));
            }
        }
        Ok(())
    }
}

/// Load configuration from an explicit TOML file. Missing keys keep their defaults.
pub fn load_from_path(path: &Path) -> Result<FetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
