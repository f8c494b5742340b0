//! Bounded retry with linear backoff.
//!
//! The loop is independent of any async runtime: callers pass the sleep
//! future factory, so the browser uses a timer and tests use a no-op.

use std::future::Future;
use std::time::Duration;

use log::{debug, warn};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Wait after the failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Runs `op` until it succeeds, fails with a non-transient error, or has
/// been tried `policy.max_attempts` times. The last error is returned.
pub async fn retry_with_policy<T, Op, Fut, Sleep, SleepFut>(
    policy: RetryPolicy,
    mut op: Op,
    mut sleep: Sleep,
) -> Result<T>
where
    Op: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
    Sleep: FnMut(Duration) -> SleepFut,
    SleepFut: Future<Output = ()>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        debug!("Attempt {}/{}", attempt, max_attempts);
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_transient() => return Err(err),
            Err(err) if attempt >= max_attempts => return Err(err),
            Err(err) => {
                let delay = policy.delay_after(attempt);
                warn!(
                    "Attempt {}/{} failed ({}), retrying in {}ms",
                    attempt,
                    max_attempts,
                    err,
                    delay.as_millis()
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn no_sleep(delays: &RefCell<Vec<Duration>>) -> impl FnMut(Duration) -> std::future::Ready<()> + '_ {
        move |d| {
            delays.borrow_mut().push(d);
            std::future::ready(())
        }
    }

    #[test]
    fn test_delays_are_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_fail_fail_succeed_returns_payload() {
        let delays = RefCell::new(Vec::new());
        let result = block_on(retry_with_policy(
            RetryPolicy::default(),
            |attempt| async move {
                if attempt < 3 {
                    Err(ApiError::Network("connection refused".into()))
                } else {
                    Ok("payload")
                }
            },
            no_sleep(&delays),
        ));
        assert_eq!(result, Ok("payload"));
        assert_eq!(
            delays.into_inner(),
            vec![Duration::from_millis(1000), Duration::from_millis(2000)]
        );
    }

    #[test]
    fn test_exhausted_attempts_return_last_error() {
        let delays = RefCell::new(Vec::new());
        let calls = RefCell::new(0u32);
        let result: Result<()> = block_on(retry_with_policy(
            RetryPolicy::default(),
            |attempt| {
                *calls.borrow_mut() += 1;
                async move {
                    Err(ApiError::Status {
                        status: 500 + attempt as u16,
                        endpoint: "/api/health".into(),
                    })
                }
            },
            no_sleep(&delays),
        ));
        assert_eq!(*calls.borrow(), 3);
        assert_eq!(
            result,
            Err(ApiError::Status { status: 503, endpoint: "/api/health".into() })
        );
        assert_eq!(delays.borrow().len(), 2);
    }

    #[test]
    fn test_decode_error_is_not_retried() {
        let delays = RefCell::new(Vec::new());
        let calls = RefCell::new(0u32);
        let result: Result<()> = block_on(retry_with_policy(
            RetryPolicy::default(),
            |_| {
                *calls.borrow_mut() += 1;
                async { Err(ApiError::Decode("expected value".into())) }
            },
            no_sleep(&delays),
        ));
        assert!(matches!(result, Err(ApiError::Decode(_))));
        assert_eq!(*calls.borrow(), 1);
        assert!(delays.borrow().is_empty());
    }

    #[test]
    fn test_single_attempt_policy() {
        let delays = RefCell::new(Vec::new());
        let result: Result<()> = block_on(retry_with_policy(
            RetryPolicy::new(0, Duration::from_millis(10)),
            |_| async { Err(ApiError::Network("offline".into())) },
            no_sleep(&delays),
        ));
        assert!(result.is_err());
        assert!(delays.borrow().is_empty());
    }
}
