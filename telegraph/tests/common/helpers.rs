//! Test helpers: scripted pins, an in-memory channel server and a builder
//! for key pollers driven by mocks

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::Instant;

use shared::PinLevel;
use telegraph::*;
use telegraph::core::{BackoffSchedule, PollTiming};
use super::fixtures::TestFixtures;

/// Key that replays a fixed list of levels, then holds the last one
pub struct ScriptedKey {
    levels: VecDeque<PinLevel>,
    last: PinLevel,
}

impl ScriptedKey {
    pub fn new(levels: impl IntoIterator<Item = PinLevel>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
            last: PinLevel::High,
        }
    }
}

impl KeyInput for ScriptedKey {
    fn read(&mut self) -> TelegraphResult<PinLevel> {
        if let Some(level) = self.levels.pop_front() {
            self.last = level;
        }
        Ok(self.last)
    }
}

/// Sounder pin that remembers every level written to it
#[derive(Clone, Default)]
pub struct RecordingSounder {
    writes: Arc<Mutex<Vec<PinLevel>>>,
}

impl RecordingSounder {
    pub fn levels(&self) -> Vec<PinLevel> {
        self.writes.lock().unwrap().clone()
    }
}

impl SounderOutput for RecordingSounder {
    fn write(&mut self, level: PinLevel) -> TelegraphResult<()> {
        self.writes.lock().unwrap().push(level);
        Ok(())
    }
}

/// In-memory stand-in for the channel server.
///
/// Every dial opens a new peer; text sent by the client is recorded and
/// `broadcast` relays text to every open peer.
#[derive(Clone, Default)]
pub struct MemoryServer {
    sent: Arc<Mutex<Vec<String>>>,
    peers: Arc<Mutex<Vec<mpsc::UnboundedSender<String>>>>,
    dialed: Arc<Mutex<Vec<String>>>,
}

impl MemoryServer {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear_sent(&self) {
        self.sent.lock().unwrap().clear();
    }

    pub fn dialed(&self) -> Vec<String> {
        self.dialed.lock().unwrap().clone()
    }

    pub fn broadcast(&self, text: &str) {
        for peer in self.peers.lock().unwrap().iter() {
            let _ = peer.send(text.to_string());
        }
    }

    /// Close every open peer, as a server restart would
    pub fn hang_up(&self) {
        self.peers.lock().unwrap().clear();
    }
}

struct MemorySender {
    sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl MessageSender for MemorySender {
    async fn send(&mut self, text: String) -> TelegraphResult<()> {
        self.sent.lock().unwrap().push(text);
        Ok(())
    }
}

struct MemoryReceiver {
    rx: mpsc::UnboundedReceiver<String>,
}

#[async_trait]
impl MessageReceiver for MemoryReceiver {
    async fn recv(&mut self) -> Option<TelegraphResult<String>> {
        self.rx.recv().await.map(Ok)
    }
}

#[async_trait]
impl ChannelDialer for MemoryServer {
    async fn dial(&self, url: &str) -> TelegraphResult<ChannelHalves> {
        self.dialed.lock().unwrap().push(url.to_string());

        let (tx, rx) = mpsc::unbounded_channel();
        self.peers.lock().unwrap().push(tx);
        Ok(ChannelHalves {
            sender: Box::new(MemorySender { sent: self.sent.clone() }),
            receiver: Box::new(MemoryReceiver { rx }),
        })
    }
}

/// Shared state behind a [`MockConnectionManager`] that behaves like a link:
/// dials consume scripted results and move the status the way the real
/// manager does.
#[derive(Clone)]
pub struct LinkScript {
    status: Arc<Mutex<ConnectionStatus>>,
    dial_results: Arc<Mutex<VecDeque<bool>>>,
    dials: Arc<Mutex<u32>>,
    sent: Arc<Mutex<Vec<(Instant, String)>>>,
}

impl LinkScript {
    /// Link starting in `status`; dials succeed per `dial_results`, then fail
    pub fn new(status: ConnectionStatus, dial_results: impl IntoIterator<Item = bool>) -> Self {
        Self {
            status: Arc::new(Mutex::new(status)),
            dial_results: Arc::new(Mutex::new(dial_results.into_iter().collect())),
            dials: Arc::new(Mutex::new(0)),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        *self.status.lock().unwrap()
    }

    pub fn dial_count(&self) -> u32 {
        *self.dials.lock().unwrap()
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(_, text)| text.clone()).collect()
    }

    /// Sent text with the (tokio) time it went out
    pub fn sent_at(&self) -> Vec<(Instant, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Wire every expectation of `mock` to this script
    pub fn install(&self, mock: &mut MockConnectionManager) {
        let status = self.status.clone();
        mock.expect_status().returning(move || *status.lock().unwrap());

        let status = self.status.clone();
        mock.expect_mark_reconnecting()
            .returning(move || *status.lock().unwrap() = ConnectionStatus::Reconnecting);

        let status = self.status.clone();
        let results = self.dial_results.clone();
        let dials = self.dials.clone();
        mock.expect_dial().returning(move || {
            *dials.lock().unwrap() += 1;
            let connected = results.lock().unwrap().pop_front().unwrap_or(false);
            let mut status = status.lock().unwrap();
            if connected {
                *status = ConnectionStatus::Connected;
            } else if *status != ConnectionStatus::NotStarted {
                *status = ConnectionStatus::Disconnected;
            }
            connected
        });

        let sent = self.sent.clone();
        mock.expect_send_msg()
            .returning(move |text| sent.lock().unwrap().push((Instant::now(), text.to_string())));
    }
}

/// Builder for key pollers over mocked pins and connections.
///
/// Playback runs with a zero-length dit unless told otherwise, so patterns
/// land on the signal queue without holding the test up.
pub struct TelegraphBuilder {
    key: MockKeyInput,
    connection: MockConnectionManager,
    timing: PollTiming,
    schedule: BackoffSchedule,
    dit: Duration,
}

impl TelegraphBuilder {
    pub fn new() -> Self {
        Self {
            key: MockKeyInput::new(),
            connection: MockConnectionManager::new(),
            timing: TestFixtures::production_timing(),
            schedule: BackoffSchedule::default(),
            dit: Duration::ZERO,
        }
    }

    pub fn with_key<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockKeyInput),
    {
        setup(&mut self.key);
        self
    }

    /// Key that is never pressed
    pub fn with_idle_key(self) -> Self {
        self.with_key(|key| {
            key.expect_read().returning(|| Ok(PinLevel::High));
        })
    }

    pub fn with_connection<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockConnectionManager),
    {
        setup(&mut self.connection);
        self
    }

    pub fn with_link(self, link: &LinkScript) -> Self {
        self.with_connection(|connection| link.install(connection))
    }

    pub fn with_timing(mut self, timing: PollTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_dit(mut self, dit: Duration) -> Self {
        self.dit = dit;
        self
    }

    pub fn build(self) -> (Telegraph<MockKeyInput, MockConnectionManager>, SignalReceiver) {
        let (signals, receiver) = signal_queue();
        let telegraph = Telegraph::new(self.key, self.connection, signals.clone(), self.timing)
            .with_playback(PlaybackSequencer::with_dit(signals, self.dit))
            .with_schedule(self.schedule);
        (telegraph, receiver)
    }
}

/// Poll `condition` until it holds or `timeout_ms` passes
pub async fn wait_for_condition<F>(mut condition: F, timeout_ms: u64) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = Instant::now() + Duration::from_millis(timeout_ms);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
