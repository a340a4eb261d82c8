//! Morse element timing
//!
//! Turns a literal pattern of `.`, `-` and ` ` into the tone steps the
//! playback sequencer pushes onto the signal queue.

use std::time::Duration;
use shared::ToneCommand;

/// Fixed playback speed, words per minute
pub const PLAYBACK_WPM: u32 = 13;

/// Played once after the first successful dial
pub const STARTUP_BANNER: &str = ".--. --- ... - ..... ----. ----.";

/// Played when a slow retry restores the connection
pub const ACKNOWLEDGE: &str = "..";

/// Played when the connection has been down for a while
pub const ATTENTION: &str = "........";

/// Dit length for a speed: 1200 ms / WPM
pub fn dit_duration(wpm: u32) -> Duration {
    Duration::from_millis(1200 / u64::from(wpm.max(1)))
}

/// One command and how many dits to hold it before the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackStep {
    pub tone: ToneCommand,
    pub hold_dits: u32,
}

impl PlaybackStep {
    const fn new(tone: ToneCommand, hold_dits: u32) -> Self {
        Self { tone, hold_dits }
    }
}

/// Expand a pattern into timed tone steps.
///
/// Spaces are word spacing already; no gap is added between symbols beyond
/// the one-dit gap that closes every dit and dah. Unknown characters silence
/// the sounder without holding.
pub fn render(pattern: &str) -> Vec<PlaybackStep> {
    let mut steps = Vec::with_capacity(pattern.len() * 2);
    for symbol in pattern.chars() {
        match symbol {
            '.' => {
                steps.push(PlaybackStep::new(ToneCommand::SoundOn, 1));
                steps.push(PlaybackStep::new(ToneCommand::SoundOff, 1));
            }
            '-' => {
                steps.push(PlaybackStep::new(ToneCommand::SoundOn, 3));
                steps.push(PlaybackStep::new(ToneCommand::SoundOff, 1));
            }
            ' ' => steps.push(PlaybackStep::new(ToneCommand::SoundOff, 3)),
            _ => steps.push(PlaybackStep::new(ToneCommand::SoundOff, 0)),
        }
    }
    steps
}

/// Total length of a pattern in dits
pub fn pattern_dits(pattern: &str) -> u32 {
    render(pattern).iter().map(|step| step.hold_dits).sum()
}
