//! Readiness polling.
//!
//! # Responsibilities
//! - Invoke a probe until it succeeds or a fixed attempt budget runs out
//! - Sleep a fixed delay between attempts, never before the first or after the last
//! - Report how many attempts were spent, and the last error on exhaustion
//!
//! # Design Decisions
//! - No exponential backoff, no jitter: readiness waits are short and local
//! - Sequential: the caller awaits the whole poll before moving on

use std::future::Future;
use std::time::Duration;

/// Fixed retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of probe invocations.
    pub attempts: u32,
    /// Pause between two consecutive invocations.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }
}

/// Successful poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ready<T> {
    pub value: T,
    /// 1-based index of the attempt that succeeded.
    pub attempts: u32,
}

/// The budget ran out without a successful probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exhausted<E> {
    pub attempts: u32,
    /// Error of the final attempt; `None` only for a zero-attempt budget.
    pub last_error: Option<E>,
}

/// Run `probe` until it returns `Ok` or the policy's attempts are used up.
///
/// The probe receives the 1-based attempt number.
pub async fn poll_until_ready<T, E, F, Fut>(
    policy: RetryPolicy,
    mut probe: F,
) -> Result<Ready<T>, Exhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut last_error = None;

    for attempt in 1..=policy.attempts {
        match probe(attempt).await {
            Ok(value) => {
                return Ok(Ready {
                    value,
                    attempts: attempt,
                })
            }
            Err(e) => {
                tracing::debug!(
                    attempt,
                    max_attempts = policy.attempts,
                    error = %e,
                    "Probe not ready"
                );
                last_error = Some(e);
            }
        }

        if attempt < policy.attempts {
            tokio::time::sleep(policy.delay).await;
        }
    }

    Err(Exhausted {
        attempts: policy.attempts,
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::Instant;

    const DELAY: Duration = Duration::from_secs(2);

    #[tokio::test(start_paused = true)]
    async fn test_first_success_returns_without_delay() {
        let calls = Cell::new(0);
        let start = Instant::now();

        let ready = poll_until_ready(RetryPolicy::new(5, DELAY), |_| {
            calls.set(calls.get() + 1);
            async { Ok::<_, String>("up") }
        })
        .await
        .unwrap();

        assert_eq!(ready, Ready { value: "up", attempts: 1 });
        assert_eq!(calls.get(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_probe_uses_exact_budget() {
        let calls = Cell::new(0);
        let start = Instant::now();

        let exhausted = poll_until_ready(RetryPolicy::new(4, DELAY), |attempt| {
            calls.set(calls.get() + 1);
            async move { Err::<(), _>(format!("refused #{attempt}")) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.get(), 4);
        assert_eq!(exhausted.attempts, 4);
        assert_eq!(exhausted.last_error.as_deref(), Some("refused #4"));
        // Three pauses between four attempts, none after the last.
        assert_eq!(start.elapsed(), DELAY * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_third_attempt() {
        let start = Instant::now();

        let ready = poll_until_ready(RetryPolicy::new(10, DELAY), |attempt| async move {
            if attempt < 3 {
                Err("starting")
            } else {
                Ok(attempt * 10)
            }
        })
        .await
        .unwrap();

        assert_eq!(ready.attempts, 3);
        assert_eq!(ready.value, 30);
        assert_eq!(start.elapsed(), DELAY * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_never_probes() {
        let calls = Cell::new(0);

        let exhausted = poll_until_ready(RetryPolicy::new(0, DELAY), |_| {
            calls.set(calls.get() + 1);
            async { Ok::<(), String>(()) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.get(), 0);
        assert_eq!(exhausted, Exhausted { attempts: 0, last_error: None });
    }
}
