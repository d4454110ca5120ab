//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::LoanlineError;

/// Wrap a future with a timeout. The in-flight future is dropped (and the
/// underlying request cancelled) when the deadline passes.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, LoanlineError>>,
) -> Result<T, LoanlineError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(LoanlineError::Timeout(duration.as_millis() as u64)),
    }
}
