//! Poll loop cadence and key-event timestamps

use std::time::{Duration, Instant};
use chrono::Utc;

/// Period of the key poll loop
pub const POLL_PERIOD: Duration = Duration::from_millis(10);

/// Interval between keep-alive messages
pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// Cadence of the key poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTiming {
    pub period: Duration,
    /// A keep-alive goes out on every tick that is a multiple of this
    pub keepalive_every: u64,
}

impl PollTiming {
    pub fn new(period: Duration, keepalive_interval: Duration) -> Self {
        let period_us = period.as_micros().max(1);
        let keepalive_every = (keepalive_interval.as_micros() / period_us).max(1) as u64;
        Self { period, keepalive_every }
    }
}

impl Default for PollTiming {
    fn default() -> Self {
        Self::new(POLL_PERIOD, KEEPALIVE_INTERVAL)
    }
}

/// Microsecond clock for key-event timestamps.
///
/// Anchored to the wall clock once at construction and advanced by the
/// monotonic clock afterwards, so timestamps look like Unix microseconds but
/// never step backwards when the system time is adjusted. Successive readings
/// are strictly increasing.
#[derive(Debug)]
pub struct MicrosecondClock {
    anchor_us: u64,
    started: Instant,
    last_us: u64,
}

impl MicrosecondClock {
    pub fn new() -> Self {
        let anchor_us = Utc::now().timestamp_micros().max(0) as u64;
        Self {
            anchor_us,
            started: Instant::now(),
            last_us: 0,
        }
    }

    /// Microseconds since the Unix epoch, as of the anchor
    pub fn now_us(&mut self) -> u64 {
        let elapsed = self.started.elapsed().as_micros() as u64;
        let now = self.anchor_us.saturating_add(elapsed).max(self.last_us + 1);
        self.last_us = now;
        now
    }
}

impl Default for MicrosecondClock {
    fn default() -> Self {
        Self::new()
    }
}
