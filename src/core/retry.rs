//! Bounded retry with backoff
//!
//! Record fetches back off linearly (`base × attempt`), attachment downloads
//! exponentially (`base × 2^attempt`). Both stop after a fixed number of
//! attempts and hand the last error back to the caller.

use crate::domain::Result;
use std::future::Future;
use std::time::Duration;

/// How the delay between attempts grows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// `base × (attempt + 1)`: 2s, 4s, 6s for a 2s base
    Linear,
    /// `base × 2^attempt`: 1s, 2s, 4s for a 1s base
    Exponential,
}

/// Retry policy for a fallible async operation
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: usize,
    base_delay: Duration,
    backoff: Backoff,
}

impl RetryPolicy {
    /// Linear backoff policy
    pub fn linear(max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            backoff: Backoff::Linear,
        }
    }

    /// Exponential backoff policy
    pub fn exponential(max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            backoff: Backoff::Exponential,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Delay slept after the zero-based `attempt` failed
    pub fn delay_for(&self, attempt: usize) -> Duration {
        match self.backoff {
            Backoff::Linear => self.base_delay.saturating_mul((attempt + 1) as u32),
            Backoff::Exponential => {
                let factor = 2u32.saturating_pow(attempt.min(31) as u32);
                self.base_delay.saturating_mul(factor)
            }
        }
    }

    /// Run `operation` until it succeeds or the attempts run out
    ///
    /// `subject` names what is being retried in the log output.
    ///
    /// # Errors
    ///
    /// Returns the error from the final attempt.
    pub async fn run<F, Fut, T>(&self, subject: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if attempt + 1 >= self.max_attempts {
                        return Err(e);
                    }

                    let delay = self.delay_for(attempt);
                    crate::log_retry_attempt!(subject, attempt + 1, self.max_attempts, delay, e);

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExportError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_linear_delays() {
        let policy = RetryPolicy::linear(3, Duration::from_secs(2));
        assert_eq!(policy.delay_for(0), Duration::from_secs(2));
        assert_eq!(policy.delay_for(1), Duration::from_secs(4));
        assert_eq!(policy.backoff(), Backoff::Linear);
    }

    #[test]
    fn test_exponential_delays() {
        let policy = RetryPolicy::exponential(3, Duration::from_secs(1));
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
    }

    #[test]
    fn test_zero_attempts_clamped() {
        let policy = RetryPolicy::linear(0, Duration::ZERO);
        assert_eq!(policy.max_attempts(), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_failures() {
        let calls = AtomicUsize::new(0);
        let policy = RetryPolicy::exponential(3, Duration::ZERO);

        let result = policy
            .run("flaky", || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(ExportError::Other(format!("failure {n}")))
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error() {
        let calls = AtomicUsize::new(0);
        let policy = RetryPolicy::linear(3, Duration::ZERO);

        let result: Result<()> = policy
            .run("broken", || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Err(ExportError::Other(format!("failure {n}")))
            })
            .await;

        assert!(result.unwrap_err().to_string().contains("failure 2"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
