//! Telegraph-specific data types

use std::fmt;

use crate::traits::{MessageReceiver, MessageSender};

/// Status of the session with the channel server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionStatus {
    NotStarted,
    Connected,
    Disconnected,
    Reconnecting,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::NotStarted => write!(f, "not started"),
            ConnectionStatus::Connected => write!(f, "connected"),
            ConnectionStatus::Disconnected => write!(f, "disconnected"),
            ConnectionStatus::Reconnecting => write!(f, "reconnecting"),
        }
    }
}

/// Which phase of the backoff schedule a redial belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttemptKind {
    /// Rapid retry straight after the connection dropped
    Immediate,
    /// Sparse retry during a prolonged outage
    Slow,
}

/// The two directions of a freshly dialed duplex channel
pub struct ChannelHalves {
    pub sender: Box<dyn MessageSender>,
    pub receiver: Box<dyn MessageReceiver>,
}

impl fmt::Debug for ChannelHalves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelHalves").finish_non_exhaustive()
    }
}
