//! Retry loop: run a closure until success or policy says stop.

use super::classify;
use super::error::FetchError;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs `op` until it succeeds or the retry policy says to stop.
///
/// `op` receives the 1-based attempt number. Before each retry `on_retry` is
/// called with the failed attempt number and its error, then the loop sleeps
/// for the policy delay.
pub fn run_with_retry<T, F, R>(
    policy: &RetryPolicy,
    mut op: F,
    mut on_retry: R,
) -> Result<T, FetchError>
where
    F: FnMut(u32) -> Result<T, FetchError>,
    R: FnMut(u32, &FetchError),
{
    let mut attempt = 1u32;
    loop {
        match op(attempt) {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt, classify::classify(&e)) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(d) => {
                    on_retry(attempt, &e);
                    if !d.is_zero() {
                        std::thread::sleep(d);
                    }
                    attempt += 1;
                }
            },
        }
    }
}
