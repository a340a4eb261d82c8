//! Core types used throughout the telegraph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;

/// Electrical level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinLevel {
    Low,
    High,
}

impl Not for PinLevel {
    type Output = PinLevel;

    fn not(self) -> PinLevel {
        match self {
            PinLevel::Low => PinLevel::High,
            PinLevel::High => PinLevel::Low,
        }
    }
}

impl fmt::Display for PinLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinLevel::Low => write!(f, "low"),
            PinLevel::High => write!(f, "high"),
        }
    }
}

/// A single sounder on/off command carried by the signal queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToneCommand {
    SoundOn,
    SoundOff,
}

impl ToneCommand {
    pub fn is_on(self) -> bool {
        matches!(self, ToneCommand::SoundOn)
    }

    /// Level for an active-high sounder pin
    pub fn level(self) -> PinLevel {
        match self {
            ToneCommand::SoundOn => PinLevel::High,
            ToneCommand::SoundOff => PinLevel::Low,
        }
    }
}

impl From<bool> for ToneCommand {
    fn from(on: bool) -> Self {
        if on { ToneCommand::SoundOn } else { ToneCommand::SoundOff }
    }
}

impl fmt::Display for ToneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToneCommand::SoundOn => write!(f, "sound-on"),
            ToneCommand::SoundOff => write!(f, "sound-off"),
        }
    }
}

/// Logical state of the operator's key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyState {
    Pressed,
    Released,
}

impl KeyState {
    /// The key pin is pulled up, so a press reads low
    pub fn from_level(level: PinLevel) -> Self {
        match level {
            PinLevel::Low => KeyState::Pressed,
            PinLevel::High => KeyState::Released,
        }
    }

    /// Sidetone command matching this key state
    pub fn tone(self) -> ToneCommand {
        match self {
            KeyState::Pressed => ToneCommand::SoundOn,
            KeyState::Released => ToneCommand::SoundOff,
        }
    }
}

/// Long-lived task or subsystem emitting a log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    KeyPoller,
    ToneDriver,
    Connection,
    Playback,
    Gpio,
    Config,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::KeyPoller => write!(f, "key_poller"),
            Component::ToneDriver => write!(f, "tone_driver"),
            Component::Connection => write!(f, "connection"),
            Component::Playback => write!(f, "playback"),
            Component::Gpio => write!(f, "gpio"),
            Component::Config => write!(f, "config"),
        }
    }
}
