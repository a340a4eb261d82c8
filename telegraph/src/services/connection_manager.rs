//! Connection manager for the channel server session
//!
//! Owns the duplex session, dials and sends on behalf of the key poller, and
//! runs one listen task per successful dial that turns inbound messages into
//! tone commands. Transport failures only ever move the status towards
//! disconnected; they never propagate to the caller.

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time;

use shared::{
    Component, component_debug, component_error, component_info, component_warn, parse_inbound,
};
use shared::logging::{log_error, log_success};
use crate::error::TelegraphError;
use crate::services::signal_queue::SignalQueue;
use crate::traits::{ChannelDialer, ConnectionManager, MessageReceiver, MessageSender};
use crate::types::ConnectionStatus;

/// Upper bound on a single dial attempt
pub const DIAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection manager over any [`ChannelDialer`]
pub struct RealConnectionManager<D: ChannelDialer> {
    url: String,
    dialer: D,
    signals: SignalQueue,
    dial_timeout: Duration,
    state: Arc<Mutex<SessionState>>,
}

struct SessionState {
    status: ConnectionStatus,
    /// Bumped on every successful dial; a listen task only acts for its own
    epoch: u64,
    sender: Option<Box<dyn MessageSender>>,
    listener: Option<JoinHandle<()>>,
}

impl SessionState {
    fn is_live(&self, epoch: u64) -> bool {
        self.epoch == epoch && self.status == ConnectionStatus::Connected
    }

    /// Drop the session without closing it
    fn discard_session(&mut self) {
        self.sender = None;
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        if self.status != status {
            component_info!(Component::Connection, "status: {} → {}", self.status, status);
            self.status = status;
        }
    }
}

impl<D: ChannelDialer> RealConnectionManager<D> {
    pub fn new(url: String, dialer: D, signals: SignalQueue) -> Self {
        Self {
            url,
            dialer,
            signals,
            dial_timeout: DIAL_TIMEOUT,
            state: Arc::new(Mutex::new(SessionState {
                status: ConnectionStatus::NotStarted,
                epoch: 0,
                sender: None,
                listener: None,
            })),
        }
    }

    pub fn with_dial_timeout(mut self, dial_timeout: Duration) -> Self {
        self.dial_timeout = dial_timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Epoch of the most recent successful dial
    pub async fn session_epoch(&self) -> u64 {
        self.state.lock().await.epoch
    }

    async fn record_dial_failure(&self, error: TelegraphError) {
        log_error(Component::Connection, &format!("Connecting to '{}'", self.url), &error);

        let mut state = self.state.lock().await;
        state.discard_session();
        if state.status != ConnectionStatus::NotStarted {
            state.set_status(ConnectionStatus::Disconnected);
        }
    }
}

#[async_trait]
impl<D: ChannelDialer> ConnectionManager for RealConnectionManager<D> {
    async fn status(&self) -> ConnectionStatus {
        self.state.lock().await.status
    }

    async fn mark_reconnecting(&self) {
        let mut state = self.state.lock().await;
        state.discard_session();
        state.set_status(ConnectionStatus::Reconnecting);
    }

    async fn dial(&self) -> bool {
        component_info!(Component::Connection, "📞 Dialing {}", self.url);

        let halves = match time::timeout(self.dial_timeout, self.dialer.dial(&self.url)).await {
            Ok(Ok(halves)) => halves,
            Ok(Err(e)) => {
                self.record_dial_failure(e).await;
                return false;
            }
            Err(_) => {
                let error = TelegraphError::DialTimeout {
                    url: self.url.clone(),
                    timeout_ms: self.dial_timeout.as_millis() as u64,
                };
                self.record_dial_failure(error).await;
                return false;
            }
        };

        let mut state = self.state.lock().await;
        state.discard_session();
        state.epoch += 1;
        state.sender = Some(halves.sender);
        state.set_status(ConnectionStatus::Connected);

        let epoch = state.epoch;
        state.listener = Some(tokio::spawn(listen(
            self.state.clone(),
            epoch,
            halves.receiver,
            self.signals.clone(),
        )));

        log_success(Component::Connection, &format!("Connected to {} (session {})", self.url, epoch));
        true
    }

    async fn send_msg(&self, text: &str) {
        let mut state = self.state.lock().await;
        component_debug!(Component::Connection, "Sending: {}", text);

        let result = match state.sender.as_mut() {
            Some(sender) => sender.send(text.to_string()).await,
            None => Err(TelegraphError::Send {
                message: "no live session".to_string(),
            }),
        };

        if let Err(e) = result {
            component_warn!(Component::Connection, "Could not send {:?}: {}", text, e);
            state.sender = None;
            if state.status != ConnectionStatus::NotStarted {
                state.set_status(ConnectionStatus::Disconnected);
            }
        }
    }
}

/// Receive loop for one session
async fn listen(
    state: Arc<Mutex<SessionState>>,
    epoch: u64,
    mut receiver: Box<dyn MessageReceiver>,
    signals: SignalQueue,
) {
    component_info!(Component::Connection, "👂 Client listening (session {})", epoch);

    loop {
        if !state.lock().await.is_live(epoch) {
            break;
        }

        match receiver.recv().await {
            Some(Ok(message)) => {
                component_debug!(Component::Connection, "Received from server: {}", message);
                if let Some(command) = parse_inbound(&message) {
                    signals.push(command);
                }
            }
            Some(Err(e)) => {
                component_warn!(Component::Connection, "Receive failed (session {}): {}", epoch, e);
                mark_disconnected(&state, epoch).await;
                break;
            }
            None => {
                component_warn!(Component::Connection, "Server closed session {}", epoch);
                mark_disconnected(&state, epoch).await;
                break;
            }
        }
    }

    component_error!(Component::Connection, "Listen task for session {} ended: not connected", epoch);
}

async fn mark_disconnected(state: &Mutex<SessionState>, epoch: u64) {
    let mut state = state.lock().await;
    if state.is_live(epoch) {
        state.sender = None;
        state.set_status(ConnectionStatus::Disconnected);
    }
}
