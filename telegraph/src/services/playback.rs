//! Playback sequencer for scripted Morse patterns

use std::time::Duration;
use tokio::time;

use shared::{Component, component_info};
use crate::core::morse::{self, PLAYBACK_WPM};
use crate::services::signal_queue::SignalQueue;

/// Pushes timed tone commands for a pattern onto the signal queue.
///
/// `play` holds the caller for the whole pattern; the key poller awaits it
/// inline, so polling pauses while a pattern sounds.
#[derive(Debug, Clone)]
pub struct PlaybackSequencer {
    signals: SignalQueue,
    dit: Duration,
}

impl PlaybackSequencer {
    pub fn new(signals: SignalQueue) -> Self {
        Self::with_dit(signals, morse::dit_duration(PLAYBACK_WPM))
    }

    pub fn with_dit(signals: SignalQueue, dit: Duration) -> Self {
        Self { signals, dit }
    }

    pub fn dit(&self) -> Duration {
        self.dit
    }

    pub async fn play(&self, pattern: &str) {
        component_info!(Component::Playback, "🎵 Playing \"{}\"", pattern);

        for step in morse::render(pattern) {
            self.signals.push(step.tone);
            if step.hold_dits > 0 {
                time::sleep(self.dit * step.hold_dits).await;
            }
        }
    }
}
