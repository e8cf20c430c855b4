//! Transient-error retry shared by the provider clients.

use fresco_error::ModelsResult;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

const INITIAL_BACKOFF_MS: u64 = 500;
const MAX_DELAY_SECS: u64 = 8;
const MAX_RETRIES: usize = 2;

/// Run a provider call, retrying transient failures with exponential
/// backoff and jitter. Permanent failures (auth, 4xx, parse) fail
/// immediately.
pub(crate) async fn with_retry<T, F, Fut>(provider: &'static str, mut call: F) -> ModelsResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ModelsResult<T>>,
{
    let strategy = ExponentialBackoff::from_millis(INITIAL_BACKOFF_MS)
        .factor(2)
        .max_delay(Duration::from_secs(MAX_DELAY_SECS))
        .map(jitter)
        .take(MAX_RETRIES);

    Retry::spawn(strategy, || {
        let fut = call();
        async move {
            match fut.await {
                Ok(value) => Ok(value),
                Err(e) if e.kind.is_retryable() => {
                    warn!(provider, error = %e, "Transient provider error, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => Err(RetryError::Permanent(e)),
            }
        }
    })
    .await
}
