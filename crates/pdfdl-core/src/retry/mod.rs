//! Retry policy for per-task downloads.
//!
//! Classifies fetch errors (transport, HTTP status, payload validation,
//! storage) and decides whether another attempt is made after a fixed delay.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
