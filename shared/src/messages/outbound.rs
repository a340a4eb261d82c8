//! Client → server messages
//!
//! A key edge travels as `<token><microseconds>v2`, e.g. `11712345678901234v2`
//! for a press. Keep-alives are the bare literal `ping`.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};
use crate::types::KeyState;

/// Keep-alive message sent periodically regardless of key activity
pub const KEEPALIVE: &str = "ping";

/// Schema tag appended to every key event
pub const VERSION_TAG: &str = "v2";

/// Leading token of a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyToken {
    /// `"0"`: key released
    Up,
    /// `"1"`: key pressed
    Down,
}

impl KeyToken {
    pub fn as_char(self) -> char {
        match self {
            KeyToken::Up => '0',
            KeyToken::Down => '1',
        }
    }

    pub fn from_char(token: char) -> SharedResult<Self> {
        match token {
            '0' => Ok(KeyToken::Up),
            '1' => Ok(KeyToken::Down),
            other => Err(SharedError::InvalidKeyToken { token: other }),
        }
    }
}

impl From<KeyState> for KeyToken {
    fn from(state: KeyState) -> Self {
        match state {
            KeyState::Pressed => KeyToken::Down,
            KeyState::Released => KeyToken::Up,
        }
    }
}

/// A timestamped key edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub token: KeyToken,
    pub timestamp_us: u64,
}

impl KeyEvent {
    pub fn new(token: KeyToken, timestamp_us: u64) -> Self {
        Self { token, timestamp_us }
    }

    /// Render the wire form, version tag included
    pub fn to_wire(&self) -> String {
        format!("{}{}{}", self.token.as_char(), self.timestamp_us, VERSION_TAG)
    }

    /// Parse a wire-form key event. Whatever follows the timestamp digits is
    /// taken as the version tag and not interpreted.
    pub fn parse(message: &str) -> SharedResult<Self> {
        let mut chars = message.chars();
        let token = chars.next().ok_or(SharedError::EmptyMessage)?;
        let token = KeyToken::from_char(token)?;

        let rest = chars.as_str();
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let timestamp_us = rest[..digits_end]
            .parse::<u64>()
            .map_err(|_| SharedError::InvalidTimestamp { input: message.to_string() })?;

        Ok(Self { token, timestamp_us })
    }
}

/// Everything the client ever sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundMessage {
    KeepAlive,
    Key(KeyEvent),
}

impl OutboundMessage {
    pub fn to_wire(&self) -> String {
        match self {
            OutboundMessage::KeepAlive => KEEPALIVE.to_string(),
            OutboundMessage::Key(event) => event.to_wire(),
        }
    }
}

impl fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}
