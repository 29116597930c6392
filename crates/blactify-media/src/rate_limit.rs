//! Retry with exponential backoff for calls to the image host's admin API.
//!
//! Only transient failures are retried: HTTP 429 and network-level errors.
//! API rejections (bad signature, unknown cloud) and undecodable bodies are
//! returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::MediaError;

fn is_retriable(err: &MediaError) -> bool {
    matches!(err, MediaError::RateLimited { .. } | MediaError::Http(_))
}

/// Executes `operation`, retrying transient errors up to `max_retries` times.
///
/// The sleep before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)`
/// seconds, so `max_retries = 3` means at most 4 attempts in total.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, MediaError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MediaError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient image host error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
