//! The single upstream call wrapper.
//!
//! Every route, stop, transfer and headway request goes through
//! [`attempt`]: one try, bounded by its own deadline, with failures logged
//! here so callers only decide what neutral value to substitute.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::transiter::UpstreamError;

/// Run one upstream call under a deadline.
///
/// A call that outlives `timeout` is dropped and reported as
/// [`UpstreamError::Timeout`]. Sibling calls are unaffected.
pub async fn attempt<T, F>(
    what: &'static str,
    target: &str,
    timeout: Duration,
    call: F,
) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    let result = match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(UpstreamError::Timeout(timeout)),
    };

    if let Err(e) = &result {
        warn!(what, target, error = %e, "upstream call failed");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_success() {
        let result = attempt("test", "x", Duration::from_secs(1), async {
            Ok::<_, UpstreamError>(7)
        })
        .await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn passes_through_failure() {
        let result: Result<u8, _> = attempt("test", "x", Duration::from_secs(1), async {
            Err(UpstreamError::NotFound("x".into()))
        })
        .await;
        assert!(matches!(result, Err(UpstreamError::NotFound(_))));
    }

    #[tokio::test]
    async fn slow_call_times_out() {
        let result: Result<u8, _> = attempt("test", "x", Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(1)
        })
        .await;
        assert!(matches!(result, Err(UpstreamError::Timeout(_))));
    }
}
