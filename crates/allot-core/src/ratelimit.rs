//! Sliding-window rate limiter
//!
//! At most `max_requests` accepted requests per caller inside any trailing
//! `window`. Rejected requests are not counted. Time comes from a [`Clock`]
//! so tests can move it by hand.
//!
//! Idle callers are pruned every [`PRUNE_EVERY`] checks, so memory follows the
//! number of callers active in the last window rather than all callers seen.

use crate::config::RateLimitConfig;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Checks between two sweeps of idle callers
pub const PRUNE_EVERY: u64 = 256;

/// Source of monotonic time
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current instant
    fn now(&self) -> Instant;
}

/// Clock backed by [`Instant::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    /// Create clock frozen at the current instant
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Outcome of one rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request was accepted
    pub allowed: bool,
    /// Configured requests per window
    pub limit: u32,
    /// Requests still accepted in the current window
    pub remaining: u32,
    /// Time until the oldest counted request leaves the window
    pub reset_after: Duration,
}

/// Caller exceeded its allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rate limit of {limit} requests exceeded; retry in {}s", .reset_after.as_secs())]
pub struct RateLimitError {
    /// Configured requests per window
    pub limit: u32,
    /// Time until another request would be accepted
    pub reset_after: Duration,
}

/// Per-caller sliding-window limiter
///
/// Safe to share between tasks; each caller's window is updated atomically.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
    windows: DashMap<String, VecDeque<Instant>>,
    checks: AtomicU64,
}

impl RateLimiter {
    /// Create limiter using the system clock
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create limiter with an explicit clock
    #[must_use]
    pub fn with_clock(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            windows: DashMap::new(),
            checks: AtomicU64::new(0),
        }
    }

    /// Configuration in effect
    #[inline]
    #[must_use]
    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Check a request from `caller`, counting it if accepted
    pub fn check(&self, caller: &str) -> RateLimitDecision {
        let limit = self.config.max_requests;
        if !self.config.enabled {
            return RateLimitDecision {
                allowed: true,
                limit,
                remaining: limit,
                reset_after: Duration::ZERO,
            };
        }

        let decision = self.count(caller, limit);
        // The entry guard is released by now; pruning locks every shard.
        if self.checks.fetch_add(1, Ordering::Relaxed) % PRUNE_EVERY == PRUNE_EVERY - 1 {
            self.prune();
        }
        decision
    }

    fn count(&self, caller: &str, limit: u32) -> RateLimitDecision {
        let now = self.clock.now();
        let window = self.config.window;
        let mut hits = self.windows.entry(caller.to_owned()).or_default();

        while hits
            .front()
            .is_some_and(|&oldest| now.saturating_duration_since(oldest) >= window)
        {
            hits.pop_front();
        }

        let counted = u32::try_from(hits.len()).unwrap_or(u32::MAX);
        let allowed = counted < limit;
        if allowed {
            hits.push_back(now);
        }

        let reset_after = hits.front().map_or(window, |&oldest| {
            window.saturating_sub(now.saturating_duration_since(oldest))
        });
        let used = u32::try_from(hits.len()).unwrap_or(u32::MAX);

        RateLimitDecision {
            allowed,
            limit,
            remaining: limit.saturating_sub(used),
            reset_after,
        }
    }

    /// Check a request, turning a rejection into an error
    ///
    /// # Errors
    /// Returns [`RateLimitError`] if `caller` has used its allowance.
    pub fn acquire(&self, caller: &str) -> Result<RateLimitDecision, RateLimitError> {
        let decision = self.check(caller);
        if decision.allowed {
            Ok(decision)
        } else {
            tracing::info!(
                caller,
                limit = decision.limit,
                reset_after_secs = decision.reset_after.as_secs(),
                "rate limit exceeded"
            );
            Err(RateLimitError {
                limit: decision.limit,
                reset_after: decision.reset_after,
            })
        }
    }

    /// Drop callers with no requests left in the window
    ///
    /// Runs on its own every [`PRUNE_EVERY`] checks.
    pub fn prune(&self) {
        let now = self.clock.now();
        let window = self.config.window;
        self.windows.retain(|_, hits| {
            hits.back()
                .is_some_and(|&newest| now.saturating_duration_since(newest) < window)
        });
    }

    /// Number of callers currently tracked
    #[must_use]
    pub fn tracked_callers(&self) -> usize {
        self.windows.len()
    }
}
