//! Outbound send pacing.
//!
//! Chat services silently drop (or temporarily ban) accounts that post faster
//! than their published rate. The limiter spaces sends so that consecutive
//! PRIVMSG writes are at least one interval apart.
//!
//! # Architecture
//!
//! A single limiter is shared by every session through the
//! [`ChatContext`](crate::context::ChatContext). Each call to
//! [`RateLimiter::wait`] reserves the next send slot and sleeps until it
//! opens. Timing uses `tokio::time`, so tests can run on a paused clock.

use crate::config::RateLimitConfig;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

/// Minimum-interval limiter for outbound chat lines.
#[derive(Debug)]
pub struct RateLimiter {
    /// Minimum spacing between two sends.
    interval: Duration,
    /// Instant the most recent wait was (or will be) satisfied.
    satisfied_at: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter allowing `messages` sends every `per`.
    ///
    /// A zero message count or period falls back to the default quota.
    pub fn new(messages: u32, per: Duration) -> Self {
        let (messages, per) = if messages == 0 || per.is_zero() {
            let fallback = RateLimitConfig::default();
            warn!(
                messages,
                per_ms = per.as_millis() as u64,
                "invalid send rate, using default quota"
            );
            (fallback.messages, Duration::from_secs(fallback.per_secs))
        } else {
            (messages, per)
        };

        Self::with_interval(per / messages)
    }

    /// Create a limiter with an explicit minimum spacing.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            satisfied_at: Mutex::new(None),
        }
    }

    /// Create a limiter from configuration.
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.messages, Duration::from_secs(config.per_secs))
    }

    /// Minimum spacing between two sends.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until at least one interval has passed since the limiter was
    /// last satisfied.
    ///
    /// Called right after a send: the caller is held for one interval, so
    /// whatever it sends next is spaced out naturally.
    pub async fn wait(&self) {
        let ready_at = {
            let now = Instant::now();
            let mut satisfied_at = self.satisfied_at.lock();
            let start = match *satisfied_at {
                Some(previous) if previous > now => previous,
                _ => now,
            };
            let ready_at = start + self.interval;
            *satisfied_at = Some(ready_at);
            ready_at
        };

        debug!(
            wait_ms = ready_at.saturating_duration_since(Instant::now()).as_millis() as u64,
            "rate limit wait"
        );
        sleep_until(ready_at).await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::from_config(&RateLimitConfig::default())
    }
}
