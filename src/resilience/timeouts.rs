//! Deadline enforcement for backend calls.
//!
//! # Responsibilities
//! - Derive a per-request deadline from the configured call timeout
//! - Wrap backend calls so they resolve by that deadline
//! - Cancel the pending call when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Cancellation is dropping the call future, so it happens on every exit path
//! - Timeout errors are distinct from other backend errors but map to the same 500

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::backend::service::{BackendError, BackendResult};

/// Furthest a deadline can lie ahead, roughly thirty years.
pub const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// A point in time by which a backend call must finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    /// A deadline `budget` from now. A budget past the clock's range is
    /// clamped to [`FAR_FUTURE`] from now.
    pub fn after(budget: Duration) -> Self {
        let now = Instant::now();
        Self {
            at: now.checked_add(budget).unwrap_or(now + FAR_FUTURE),
            budget,
        }
    }

    /// The total duration this deadline was created with.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left before expiry, zero once passed.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }
}

/// Await `call` until `deadline`. On expiry the call future is dropped and
/// `BackendError::DeadlineExceeded` is returned.
pub async fn with_deadline<T, F>(deadline: Deadline, call: F) -> BackendResult<T>
where
    F: Future<Output = BackendResult<T>>,
{
    match tokio::time::timeout_at(deadline.at, call).await {
        Ok(result) => result,
        Err(_) => Err(BackendError::DeadlineExceeded(deadline.budget)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_completes_before_deadline() {
        let deadline = Deadline::after(Duration::from_secs(5));
        let result = with_deadline(deadline, async { Ok::<_, BackendError>(42) }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_error_passes_through() {
        let deadline = Deadline::after(Duration::from_secs(5));
        let result: BackendResult<()> =
            with_deadline(deadline, async { Err(BackendError::Rpc("boom".into())) }).await;
        assert_eq!(result, Err(BackendError::Rpc("boom".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_cancels_call() {
        let dropped = Arc::new(AtomicBool::new(false));
        let flag = DropFlag(dropped.clone());
        let deadline = Deadline::after(Duration::from_secs(2));

        let result: BackendResult<()> = with_deadline(deadline, async move {
            let _flag = flag;
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;

        assert_eq!(result, Err(BackendError::DeadlineExceeded(Duration::from_secs(2))));
        assert!(dropped.load(Ordering::SeqCst));
        assert!(deadline.remaining().is_zero());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remaining_counts_down() {
        let deadline = Deadline::after(Duration::from_secs(10));
        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(deadline.remaining(), Duration::from_secs(6));
        assert_eq!(deadline.budget(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_budget_is_clamped() {
        let deadline = Deadline::after(Duration::from_secs(i64::MAX as u64));
        assert_eq!(deadline.budget(), Duration::from_secs(i64::MAX as u64));
        assert_eq!(deadline.remaining(), FAR_FUTURE);

        let result = with_deadline(deadline, async { Ok::<_, BackendError>(7) }).await;
        assert_eq!(result, Ok(7));
    }
}
