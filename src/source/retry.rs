//! Bounded exponential backoff for rate-limited fetches.

use super::RepositorySource;
use crate::model::{FetchError, PageRequest, RepositorySummary};
use std::time::Duration;
use tracing::{debug, warn};

/// Blocks the calling thread between retries.
///
/// Injected so tests can observe delays without waiting.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Retry budget for rate-limited requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total requests allowed, including the first. Always at least 1.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    pub base_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    /// A policy that retries `max_attempts` times without waiting.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    /// Delay before retry number `retry` (1-based), capped at `max_delay`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        let factor = 1u32 << exponent;
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Fetch one page, retrying only while the provider reports rate limiting.
///
/// Returns the first successful page exactly once. After `max_attempts`
/// rate-limited responses returns `FetchError::RateLimited { attempts }`.
/// Every other error is returned immediately.
pub fn fetch_with_retry<S>(
    source: &S,
    request: &PageRequest,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<Vec<RepositorySummary>, FetchError>
where
    S: RepositorySource + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match source.fetch_page(request) {
            Err(err) if err.is_rate_limited() => {
                if attempt >= max_attempts {
                    warn!(
                        attempts = attempt,
                        page = request.page.get(),
                        "Rate limit persisted; giving up"
                    );
                    return Err(FetchError::RateLimited { attempts: attempt });
                }
                let delay = policy.delay_for(attempt);
                debug!(attempt, ?delay, "Rate limited; backing off");
                sleeper.sleep(delay);
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageIndex, Query, SearchMode};
    use crate::source::ScriptedSource;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSleeper {
        slept: RefCell<Vec<Duration>>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.slept.borrow_mut().push(duration);
        }
    }

    fn request() -> PageRequest {
        PageRequest::new(SearchMode::Public, Query::new("raft"), PageIndex::FIRST)
    }

    fn source_with_one_repo() -> ScriptedSource {
        ScriptedSource::new().with_pages(
            "raft",
            vec![vec![crate::model::RepositorySummary::new(
                "a/raft",
                "https://github.com/a/raft",
            )]],
        )
    }

    #[test]
    fn delays_double_and_cap() {
        let policy = RetryPolicy::new(6, Duration::from_millis(100), Duration::from_millis(350));
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(350));
        assert_eq!(policy.delay_for(30), Duration::from_millis(350));
    }

    #[test]
    fn zero_attempts_is_clamped_to_one() {
        assert_eq!(RetryPolicy::immediate(0).max_attempts, 1);
    }

    #[test]
    fn retries_through_rate_limit_then_succeeds() {
        let source = source_with_one_repo();
        source.fail_next(FetchError::RateLimited { attempts: 1 });
        source.fail_next(FetchError::RateLimited { attempts: 1 });
        let sleeper = RecordingSleeper::default();
        let policy = RetryPolicy::new(5, Duration::from_millis(10), Duration::from_secs(1));

        let page = fetch_with_retry(&source, &request(), &policy, &sleeper).unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(source.calls().len(), 3);
        assert_eq!(
            *sleeper.slept.borrow(),
            vec![Duration::from_millis(10), Duration::from_millis(20)]
        );
    }

    #[test]
    fn gives_up_after_budget() {
        let source = source_with_one_repo();
        for _ in 0..3 {
            source.fail_next(FetchError::RateLimited { attempts: 1 });
        }
        let sleeper = RecordingSleeper::default();

        let err = fetch_with_retry(&source, &request(), &RetryPolicy::immediate(3), &sleeper)
            .unwrap_err();

        assert_eq!(err, FetchError::RateLimited { attempts: 3 });
        assert_eq!(source.calls().len(), 3);
        assert_eq!(sleeper.slept.borrow().len(), 2);
    }

    #[test]
    fn other_errors_are_not_retried() {
        let source = source_with_one_repo();
        source.fail_next(FetchError::Transport("reset".into()));
        let sleeper = RecordingSleeper::default();

        let err = fetch_with_retry(&source, &request(), &RetryPolicy::immediate(5), &sleeper)
            .unwrap_err();

        assert_eq!(err, FetchError::Transport("reset".into()));
        assert_eq!(source.calls().len(), 1);
        assert!(sleeper.slept.borrow().is_empty());
    }
}
