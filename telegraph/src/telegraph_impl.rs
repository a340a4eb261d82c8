//! Telegraph implementation with dependency injection
//!
//! The key poller is the client's control loop. Each tick it drives the
//! reconnection policy while the session is down, samples the key, turns key
//! edges into a sidetone command plus a timestamped message for the server,
//! and periodically sends a keep-alive.

use tokio::time::{self, MissedTickBehavior};

use shared::{
    Component, KeyEvent, KeyState, KeyToken, OutboundMessage, PinLevel, component_debug,
    component_info, component_warn,
};
use shared::logging::log_success;
use crate::core::backoff::{BackoffSchedule, ReconnectPolicy};
use crate::core::morse::{ACKNOWLEDGE, ATTENTION, STARTUP_BANNER};
use crate::core::timing::{MicrosecondClock, PollTiming};
use crate::services::playback::PlaybackSequencer;
use crate::services::signal_queue::SignalQueue;
use crate::traits::{ConnectionManager, KeyInput};
use crate::types::{AttemptKind, ConnectionStatus};

/// Key poller with injected key input and connection manager
pub struct Telegraph<K, C>
where
    K: KeyInput,
    C: ConnectionManager,
{
    key_input: K,
    connection: C,
    signals: SignalQueue,
    playback: PlaybackSequencer,
    policy: ReconnectPolicy,
    clock: MicrosecondClock,
    timing: PollTiming,
    last_level: PinLevel,
    tick_count: u64,
}

impl<K, C> Telegraph<K, C>
where
    K: KeyInput,
    C: ConnectionManager,
{
    /// Create new telegraph instance
    pub fn new(key_input: K, connection: C, signals: SignalQueue, timing: PollTiming) -> Self {
        Self {
            key_input,
            connection,
            playback: PlaybackSequencer::new(signals.clone()),
            signals,
            policy: ReconnectPolicy::default(),
            clock: MicrosecondClock::new(),
            timing,
            // pulled up, so an idle key reads high
            last_level: PinLevel::High,
            tick_count: 0,
        }
    }

    pub fn with_playback(mut self, playback: PlaybackSequencer) -> Self {
        self.playback = playback;
        self
    }

    pub fn with_schedule(mut self, schedule: BackoffSchedule) -> Self {
        self.policy = ReconnectPolicy::new(schedule);
        self
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn redial_count(&self) -> u64 {
        self.policy.redial_count()
    }

    pub fn key_state(&self) -> KeyState {
        KeyState::from_level(self.last_level)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// First dial, with the startup banner if it connects
    pub async fn start(&mut self) {
        if self.connection.dial().await {
            self.playback.play(STARTUP_BANNER).await;
        }
    }

    /// Run the poll loop for the life of the process
    pub async fn run(mut self) {
        component_info!(
            Component::KeyPoller,
            "Polling every {:?}, keep-alive every {} ticks",
            self.timing.period,
            self.timing.keepalive_every
        );
        self.start().await;

        let mut interval = time::interval(self.timing.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }

    /// One pass of the control loop, without the sleep
    pub async fn tick(&mut self) {
        self.drive_reconnection().await;
        self.poll_key().await;

        if self.tick_count % self.timing.keepalive_every == 0 {
            self.connection.send_msg(&OutboundMessage::KeepAlive.to_wire()).await;
        }
        self.tick_count += 1;
    }

    async fn drive_reconnection(&mut self) {
        if self.connection.status().await == ConnectionStatus::Connected {
            return;
        }

        let attempt = self.policy.next_tick();
        self.connection.mark_reconnecting().await;

        if let Some(kind) = attempt {
            if kind == AttemptKind::Slow {
                component_info!(
                    Component::KeyPoller,
                    "Redialing after {} disconnected ticks",
                    self.policy.redial_count()
                );
            }

            if self.connection.dial().await {
                log_success(
                    Component::KeyPoller,
                    &format!("Reconnected after {} ticks", self.policy.redial_count()),
                );
                self.policy.record_success();
                if kind == AttemptKind::Slow {
                    self.playback.play(ACKNOWLEDGE).await;
                }
            }
        }

        if self.policy.attention_due() {
            component_warn!(
                Component::KeyPoller,
                "Connection down for {} ticks, alerting operator",
                self.policy.redial_count()
            );
            self.playback.play(ATTENTION).await;
        }
    }

    async fn poll_key(&mut self) {
        let level = match self.key_input.read() {
            Ok(level) => level,
            Err(e) => {
                component_debug!(Component::KeyPoller, "Key read failed: {}", e);
                return;
            }
        };

        if level == self.last_level {
            return;
        }
        self.last_level = level;

        let state = KeyState::from_level(level);
        // the server does not echo our own key, so sound it locally
        self.signals.push(state.tone());

        let event = KeyEvent::new(KeyToken::from(state), self.clock.now_us());
        component_debug!(Component::KeyPoller, "Key {:?} at {}", state, event.timestamp_us);
        self.connection.send_msg(&OutboundMessage::Key(event).to_wire()).await;
    }
}
