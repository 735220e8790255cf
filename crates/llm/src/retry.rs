//! Bounded retry with fixed backoff.
//!
//! Every completion call goes through [`with_retry`]. Transient failures
//! are logged and retried after a fixed delay; once the attempt ceiling is
//! hit the terminal [`AppError::RetriesExhausted`] surfaces to the caller.

use std::future::Future;
use std::time::Duration;

use chunkwise_core::{AppError, AppResult};

/// Retry policy: attempt ceiling and fixed delay between attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: usize,

    /// Fixed pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with an explicit ceiling and delay.
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

/// Execute `op`, retrying on failure according to `policy`.
///
/// Each failure is logged with the attempt count; after the last failed
/// attempt the terminal error is returned and no further attempts are made.
/// `op` is invoked exactly once per attempt, so a persistently failing
/// operation runs `policy.max_attempts` times in total.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    for attempt in 1..=policy.max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::warn!(
                    "{} failed (attempt {}/{}): {}",
                    label,
                    attempt,
                    policy.max_attempts,
                    e
                );

                if attempt < policy.max_attempts {
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    tracing::error!(
        "{}: giving up after {} attempts",
        label,
        policy.max_attempts
    );

    Err(AppError::RetriesExhausted {
        attempts: policy.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn instant_policy(max_attempts: usize) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let calls = Cell::new(0usize);

        let result = with_retry(&instant_policy(5), "op", || {
            calls.set(calls.get() + 1);
            async { Ok::<_, AppError>(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_fails_twice_then_succeeds() {
        let calls = Cell::new(0usize);

        let result = with_retry(&instant_policy(5), "op", || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n <= 2 {
                    Err(AppError::Completion("transient".to_string()))
                } else {
                    Ok("answer".to_string())
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "answer");
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_counts_attempts() {
        let calls = Cell::new(0usize);

        let result: AppResult<()> = with_retry(&instant_policy(4), "op", || {
            calls.set(calls.get() + 1);
            async { Err(AppError::Completion("down".to_string())) }
        })
        .await;

        assert_eq!(calls.get(), 4);
        match result {
            Err(AppError::RetriesExhausted { attempts }) => assert_eq!(attempts, 4),
            other => panic!("expected RetriesExhausted, got {:?}", other),
        }
    }
}
