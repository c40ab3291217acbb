//! Consecutive-failure circuit breaker for upstream calls.
//!
//! # States
//! - Closed: calls pass through to the guarded operation
//! - Open: calls are rejected without invoking the operation
//!
//! # State Transitions
//! ```text
//! Closed → Open:   failure_count >= fail_max after a failed call
//! Open → Closed:   next call after reset_timeout has elapsed since the
//!                  last failure (counter reset, call proceeds)
//! Open → Open:     call inside the cooldown is rejected
//! ```
//!
//! There is no half-open probe: once the cooldown has elapsed every caller
//! that arrives before the next failure is let through.

use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

/// Externally visible breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    /// Calls pass through.
    Closed,
    /// Calls are rejected until the cooldown elapses.
    Open,
}

impl fmt::Display for BreakerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("closed"),
            Self::Open => f.write_str("open"),
        }
    }
}

/// Outcome of a rejected or failed guarded call.
#[derive(Debug, thiserror::Error)]
pub enum BreakerError<E> {
    /// The breaker is open; the operation was not invoked.
    #[error("circuit breaker is open")]
    Open,

    /// The operation ran and failed. The error is passed through unchanged.
    #[error(transparent)]
    Inner(E),
}

#[derive(Debug)]
struct Counters {
    state: BreakerState,
    failure_count: u32,
    last_failure: Option<Instant>,
}

/// Circuit breaker guarding one class of asynchronous operation.
///
/// Shared by reference across concurrent callers. Counters live behind a
/// [`Mutex`] that is only held for bookkeeping, never while the guarded
/// future is being polled.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: &'static str,
    fail_max: u32,
    reset_timeout: Duration,
    counters: Mutex<Counters>,
}

impl CircuitBreaker {
    /// Creates a closed breaker.
    ///
    /// `fail_max` is clamped to at least 1.
    #[must_use]
    pub fn new(name: &'static str, fail_max: u32, reset_timeout: Duration) -> Self {
        Self {
            name,
            fail_max: fail_max.max(1),
            reset_timeout,
            counters: Mutex::new(Counters {
                state: BreakerState::Closed,
                failure_count: 0,
                last_failure: None,
            }),
        }
    }

    /// Runs `operation` through the breaker.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::Open`] without invoking `operation` while the
    /// breaker is open and the cooldown has not elapsed, or
    /// [`BreakerError::Inner`] carrying the operation's own error after the
    /// failure has been recorded.
    pub async fn call<F, Fut, T, E>(&self, operation: F) -> Result<T, BreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.admit()?;

        match operation().await {
            Ok(value) => {
                self.record_success();
                Ok(value)
            }
            Err(e) => {
                self.record_failure();
                Err(BreakerError::Inner(e))
            }
        }
    }

    /// Current state as last recorded. An open breaker whose cooldown has
    /// elapsed still reports `Open` until the next call closes it.
    #[must_use]
    pub fn state(&self) -> BreakerState {
        self.lock().state
    }

    /// Consecutive failures recorded since the last success or reset.
    #[must_use]
    pub fn failure_count(&self) -> u32 {
        self.lock().failure_count
    }

    /// Failure threshold.
    #[must_use]
    pub const fn fail_max(&self) -> u32 {
        self.fail_max
    }

    fn admit<E>(&self) -> Result<(), BreakerError<E>> {
        let mut counters = self.lock();
        if counters.state == BreakerState::Closed {
            return Ok(());
        }

        let cooled_down = counters
            .last_failure
            .is_none_or(|at| at.elapsed() >= self.reset_timeout);
        if cooled_down {
            counters.state = BreakerState::Closed;
            counters.failure_count = 0;
            tracing::info!(breaker = self.name, "reset timeout reached, closing circuit");
            Ok(())
        } else {
            tracing::debug!(
                breaker = self.name,
                reset_timeout_secs = self.reset_timeout.as_secs(),
                "circuit open, rejecting call"
            );
            Err(BreakerError::Open)
        }
    }

    fn record_success(&self) {
        self.lock().failure_count = 0;
    }

    fn record_failure(&self) {
        let mut counters = self.lock();
        counters.failure_count = counters.failure_count.saturating_add(1);
        counters.last_failure = Some(Instant::now());

        if counters.failure_count >= self.fail_max && counters.state == BreakerState::Closed {
            counters.state = BreakerState::Open;
            tracing::warn!(
                breaker = self.name,
                failure_count = counters.failure_count,
                "circuit opened"
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, Counters> {
        // Counters stay consistent even if a holder panicked.
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn breaker() -> CircuitBreaker {
        CircuitBreaker::new("test", 3, Duration::from_secs(10))
    }

    async fn fail(b: &CircuitBreaker, calls: &AtomicU32) -> Result<(), BreakerError<&'static str>> {
        b.call(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>("boom")
        })
        .await
    }

    async fn succeed(b: &CircuitBreaker, calls: &AtomicU32) -> Result<u32, BreakerError<&'static str>> {
        b.call(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, &'static str>(7)
        })
        .await
    }

    #[tokio::test]
    async fn success_passes_value_through() {
        let b = breaker();
        let calls = AtomicU32::new(0);
        let Ok(v) = succeed(&b, &calls).await else {
            panic!("expected success");
        };
        assert_eq!(v, 7);
        assert_eq!(b.state(), BreakerState::Closed);
    }

    #[tokio::test]
    async fn failure_is_propagated_unchanged() {
        let b = breaker();
        let calls = AtomicU32::new(0);
        match fail(&b, &calls).await {
            Err(BreakerError::Inner(e)) => assert_eq!(e, "boom"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(b.failure_count(), 1);
        assert_eq!(b.state(), BreakerState::Closed);
    }

    #[tokio::test]
    async fn success_resets_failure_count() {
        let b = breaker();
        let calls = AtomicU32::new(0);
        let _ = fail(&b, &calls).await;
        let _ = fail(&b, &calls).await;
        assert_eq!(b.failure_count(), 2);

        let _ = succeed(&b, &calls).await;
        assert_eq!(b.failure_count(), 0);
        assert_eq!(b.state(), BreakerState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn opens_after_fail_max_and_rejects_without_invoking() {
        let b = breaker();
        let calls = AtomicU32::new(0);
        for _ in 0..3 {
            assert!(matches!(fail(&b, &calls).await, Err(BreakerError::Inner(_))));
        }
        assert_eq!(b.state(), BreakerState::Open);
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(matches!(succeed(&b, &calls).await, Err(BreakerError::Open)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn closes_after_reset_timeout_and_resets_on_success() {
        let b = breaker();
        let calls = AtomicU32::new(0);
        for _ in 0..3 {
            let _ = fail(&b, &calls).await;
        }
        assert_eq!(b.state(), BreakerState::Open);

        tokio::time::advance(Duration::from_secs(10)).await;
        let Ok(v) = succeed(&b, &calls).await else {
            panic!("call after cooldown should pass through");
        };
        assert_eq!(v, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(b.state(), BreakerState::Closed);
        assert_eq!(b.failure_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_after_cooldown_counts_from_zero() {
        let b = breaker();
        let calls = AtomicU32::new(0);
        for _ in 0..3 {
            let _ = fail(&b, &calls).await;
        }
        tokio::time::advance(Duration::from_secs(10)).await;

        assert!(matches!(fail(&b, &calls).await, Err(BreakerError::Inner(_))));
        assert_eq!(b.failure_count(), 1);
        assert_eq!(b.state(), BreakerState::Closed);
    }

    #[test]
    fn zero_fail_max_is_clamped() {
        let b = CircuitBreaker::new("test", 0, Duration::from_secs(1));
        assert_eq!(b.fail_max(), 1);
    }
}
