//! Telemetry utilities for send timing and span construction.

use std::time::Instant;

/// Guard for timing one delivery.
///
/// Logs the elapsed time when dropped, whether or not the send succeeded.
pub struct SendTimer {
    channel: String,
    start: Instant,
}

impl SendTimer {
    /// Start timing a delivery to `channel`.
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for SendTimer {
    fn drop(&mut self) {
        tracing::debug!(
            channel = %self.channel,
            elapsed_ms = self.start.elapsed().as_millis() as u64,
            "delivery finished"
        );
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for one chat delivery.
    pub fn send(channel: &str, nick: &str) -> Span {
        info_span!("send", channel = %channel, nick = %nick)
    }

    /// Create a span for a reconciliation pass.
    pub fn reconcile(current: usize, incoming: usize) -> Span {
        info_span!("reconcile", current, incoming)
    }
}
