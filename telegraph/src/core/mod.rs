//! Core business logic modules
//!
//! Pure logic with no I/O: loop timing and timestamps, the reconnection
//! backoff schedule, and Morse pattern rendering.

pub mod timing;
pub mod backoff;
pub mod morse;

pub use timing::{MicrosecondClock, PollTiming};
pub use backoff::{BackoffSchedule, ReconnectPolicy};
pub use morse::{render, dit_duration, PlaybackStep};
