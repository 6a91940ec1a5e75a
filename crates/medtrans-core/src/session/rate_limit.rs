//! Fixed-window request counting per session.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::{RateLimitWindow, Session};

/// Longest window honoured; longer configured windows are clamped.
const MAX_WINDOW_DAYS: i64 = 365;

/// How many requests a session may make per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Maximum requests per window.
    pub limit: u32,
    /// Window duration.
    pub per: Duration,
    /// When false every request is let through untouched.
    pub enabled: bool,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            limit: 20,
            per: Duration::from_secs(60),
            enabled: true,
        }
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_after: Duration,
}

impl RateLimitPolicy {
    pub fn new(limit: u32, per: Duration) -> Self {
        Self {
            limit,
            per,
            enabled: true,
        }
    }

    /// Pass-through policy for serverless deployments.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    fn window_length(&self) -> TimeDelta {
        let max = TimeDelta::days(MAX_WINDOW_DAYS);
        TimeDelta::from_std(self.per).map_or(max, |per| per.min(max))
    }

    /// Count one request against the session's current window.
    ///
    /// A rejected request does not increment the counter.
    pub fn check_and_increment(
        &self,
        session: &mut Session,
        now: DateTime<Utc>,
    ) -> RateLimitDecision {
        if !self.enabled {
            return RateLimitDecision {
                allowed: true,
                remaining: self.limit,
                reset_after: Duration::ZERO,
            };
        }

        let fresh = RateLimitWindow {
            count: 0,
            reset_time: now
                .checked_add_signed(self.window_length())
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        let window = session.rate_limit.get_or_insert(fresh);
        if now > window.reset_time {
            *window = fresh;
        }

        let reset_after = (window.reset_time - now).to_std().unwrap_or(Duration::ZERO);

        if window.count >= self.limit {
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                reset_after,
            };
        }

        window.count += 1;
        RateLimitDecision {
            allowed: true,
            remaining: self.limit - window.count,
            reset_after,
        }
    }
}
