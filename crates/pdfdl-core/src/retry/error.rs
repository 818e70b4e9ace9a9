//! Fetch error type for retry classification.

/// Error from a single download attempt.
/// Kept typed so the retry policy can classify it before it is logged.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection refused, DNS, etc.).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Response body does not start with the `%PDF` marker.
    #[error("downloaded file is not a valid PDF ({len} bytes)")]
    NotPdf { len: usize },
    /// Writing the payload to disk failed (disk full, permission denied). Not retried.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}
