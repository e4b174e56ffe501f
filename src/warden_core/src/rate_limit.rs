use chrono::{DateTime, Duration, Utc};

/// Windowed counting rate limit: given how many events happened in the
/// trailing window, decide whether one more is allowed. The counting itself
/// is done by the caller (store query), keeping this policy reusable across
/// flows with different windows and thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitPolicy {
    window: Duration,
    max_requests: u64,
}

impl RateLimitPolicy {
    pub fn new(window: Duration, max_requests: u64) -> Self {
        Self {
            window,
            max_requests,
        }
    }

    /// Lower bound for the caller's count query.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.window
    }

    pub fn allow(&self, count_in_window: u64) -> bool {
        count_in_window < self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
