//! Telegraph trait definitions for dependency injection
//!
//! Hardware pins and the network transport sit behind these seams so the key
//! poller, tone driver and connection manager can be driven by mocks in tests.

use async_trait::async_trait;

use shared::PinLevel;
use crate::error::TelegraphResult;
use crate::types::{ChannelHalves, ConnectionStatus};

/// Debounced digital input wired to the operator's key
#[mockall::automock]
pub trait KeyInput: Send {
    /// Read the current pin level
    fn read(&mut self) -> TelegraphResult<PinLevel>;
}

/// Digital output driving a sounder
#[mockall::automock]
pub trait SounderOutput: Send {
    /// Drive the pin to the given level
    fn write(&mut self, level: PinLevel) -> TelegraphResult<()>;
}

impl<T: KeyInput + ?Sized> KeyInput for Box<T> {
    fn read(&mut self) -> TelegraphResult<PinLevel> {
        (**self).read()
    }
}

impl<T: SounderOutput + ?Sized> SounderOutput for Box<T> {
    fn write(&mut self, level: PinLevel) -> TelegraphResult<()> {
        (**self).write(level)
    }
}

/// Outbound half of a message-oriented duplex channel
#[mockall::automock]
#[async_trait]
pub trait MessageSender: Send {
    /// Send one text message
    async fn send(&mut self, text: String) -> TelegraphResult<()>;
}

/// Inbound half of a message-oriented duplex channel
#[mockall::automock]
#[async_trait]
pub trait MessageReceiver: Send {
    /// Wait for the next text message; `None` once the peer has closed
    async fn recv(&mut self) -> Option<TelegraphResult<String>>;
}

/// Opens duplex channels to the server
#[mockall::automock]
#[async_trait]
pub trait ChannelDialer: Send + Sync {
    /// Open a channel to `url`
    async fn dial(&self, url: &str) -> TelegraphResult<ChannelHalves>;
}

/// Owner of the session with the channel server.
///
/// None of these operations fail: transport errors are logged and folded
/// into the connection status.
#[mockall::automock]
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    /// Current session status
    async fn status(&self) -> ConnectionStatus;

    /// Mark a redial as in progress, discarding any half-open session
    async fn mark_reconnecting(&self);

    /// Attempt to open a session; returns whether it is now connected
    async fn dial(&self) -> bool;

    /// Send a message on the live session
    async fn send_msg(&self, text: &str);
}
