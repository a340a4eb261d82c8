//! Reconnection backoff schedule
//!
//! The key poller consults the policy once per tick while the session is not
//! connected. Every such tick bumps the redial count; the schedule decides
//! whether that tick actually dials.

use crate::types::AttemptKind;

/// Shape of the redial cadence, in poll ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffSchedule {
    /// Ticks that redial straight away after a drop
    pub immediate_attempts: u64,
    /// Spacing of the slow retries that follow
    pub slow_interval: u64,
    /// Redial count at which the operator is told about the outage
    pub attention_at: u64,
}

impl Default for BackoffSchedule {
    fn default() -> Self {
        Self {
            immediate_attempts: 2,
            slow_interval: 500,
            attention_at: 100,
        }
    }
}

impl BackoffSchedule {
    /// Whether the tick with this redial count dials, and how.
    ///
    /// With the default schedule that is counts 1 and 2 (immediate) and then
    /// 3, 503, 1003, ... (slow).
    pub fn attempt_for(&self, redial_count: u64) -> Option<AttemptKind> {
        if redial_count == 0 {
            return None;
        }
        if redial_count <= self.immediate_attempts {
            return Some(AttemptKind::Immediate);
        }

        let since_immediate = redial_count - self.immediate_attempts - 1;
        if since_immediate % self.slow_interval.max(1) == 0 {
            Some(AttemptKind::Slow)
        } else {
            None
        }
    }

    /// First slow-retry count past the attention mark. A counter that runs
    /// out of range restarts here, so it keeps dialing at the slow cadence
    /// without alerting the operator again.
    fn restart_count(&self) -> u64 {
        let interval = self.slow_interval.max(1);
        let first_slow = self.immediate_attempts + 1;
        first_slow + interval * (self.attention_at.saturating_sub(first_slow) / interval + 1)
    }
}

/// Redial counter driven by the key poller
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    schedule: BackoffSchedule,
    redial_count: u64,
}

impl ReconnectPolicy {
    pub fn new(schedule: BackoffSchedule) -> Self {
        Self { schedule, redial_count: 0 }
    }

    pub fn redial_count(&self) -> u64 {
        self.redial_count
    }

    /// Count one disconnected tick and decide whether it dials
    pub fn next_tick(&mut self) -> Option<AttemptKind> {
        self.redial_count = self
            .redial_count
            .checked_add(1)
            .unwrap_or_else(|| self.schedule.restart_count());
        self.schedule.attempt_for(self.redial_count)
    }

    pub fn record_success(&mut self) {
        self.redial_count = 0;
    }

    /// True only on the tick the redial count lands on the attention mark
    pub fn attention_due(&self) -> bool {
        self.redial_count == self.schedule.attention_at
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::new(BackoffSchedule::default())
    }
}
