//! Queue-wide job rate limiting with governor.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use rcvis_error::ConfigError;
use std::sync::Arc;
use std::time::Duration;

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Caps how often jobs leave the queue, across every worker that shares it.
///
/// Jobs are spaced evenly: at `n` jobs per second one job may start every
/// `1/n` seconds, with no burst allowance.
///
/// ```
/// use rcvis_dispatch::JobRateLimiter;
///
/// assert!(JobRateLimiter::per_second(1).is_ok());
/// assert!(JobRateLimiter::per_second(0).is_err());
/// ```
#[derive(Clone)]
pub struct JobRateLimiter {
    limiter: Arc<DirectRateLimiter>,
    jobs_per_second: u32,
}

impl std::fmt::Debug for JobRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobRateLimiter")
            .field("jobs_per_second", &self.jobs_per_second)
            .finish_non_exhaustive()
    }
}

impl JobRateLimiter {
    /// Allows `jobs_per_second` jobs per second.
    ///
    /// # Errors
    ///
    /// Rejects a rate of zero.
    pub fn per_second(jobs_per_second: u32) -> Result<Self, ConfigError> {
        let period = Duration::from_secs(1)
            .checked_div(jobs_per_second)
            .ok_or_else(|| ConfigError::for_key("queue.jobs_per_second", "must be greater than 0"))?;
        let quota = Quota::with_period(period)
            .ok_or_else(|| ConfigError::for_key("queue.jobs_per_second", "is too high to schedule"))?;
        Ok(Self {
            limiter: Arc::new(GovernorRateLimiter::direct(quota)),
            jobs_per_second,
        })
    }

    /// Configured rate.
    pub fn jobs_per_second(&self) -> u32 {
        self.jobs_per_second
    }

    /// Waits until the next job may start.
    pub async fn until_ready(&self) {
        self.limiter.until_ready().await;
    }

    /// Whether a job could start right now, consuming the slot if so.
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}
