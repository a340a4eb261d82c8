//! Shared fakes for service tests

use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use tokio::sync::mpsc;

use shared::PinLevel;
use crate::error::{TelegraphError, TelegraphResult};
use crate::traits::{MessageReceiver, MessageSender, SounderOutput};
use crate::types::ChannelHalves;

/// Sounder pin that remembers every level written to it
#[derive(Clone, Default)]
pub struct RecordingSounder {
    pub writes: Arc<Mutex<Vec<PinLevel>>>,
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

/// Sender half that records outbound text, optionally failing every send
#[derive(Clone, Default)]
pub struct RecordingSender {
    pub sent: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&mut self, text: String) -> TelegraphResult<()> {
        if self.fail {
            return Err(TelegraphError::Send { message: "broken pipe".to_string() });
        }
        self.sent.lock().unwrap().push(text);
        Ok(())
    }
}

/// Receiver half fed by the test through a channel; blocks until fed
pub struct PipeReceiver {
    rx: mpsc::UnboundedReceiver<Option<TelegraphResult<String>>>,
}

#[async_trait]
impl MessageReceiver for PipeReceiver {
    async fn recv(&mut self) -> Option<TelegraphResult<String>> {
        self.rx.recv().await.flatten()
    }
}

/// Test-side handle for a [`PipeReceiver`]
#[derive(Clone)]
pub struct Inbound {
    tx: mpsc::UnboundedSender<Option<TelegraphResult<String>>>,
}

impl Inbound {
    pub fn message(&self, text: &str) {
        let _ = self.tx.send(Some(Ok(text.to_string())));
    }

    pub fn error(&self) {
        let _ = self.tx.send(Some(Err(TelegraphError::Transport {
            message: "connection reset".to_string(),
        })));
    }

    pub fn close(&self) {
        let _ = self.tx.send(None);
    }
}

/// Channel halves wired to a recording sender and a fed receiver
pub fn pipe_halves(sender: RecordingSender) -> (ChannelHalves, Inbound) {
    let (tx, rx) = mpsc::unbounded_channel();
    let halves = ChannelHalves {
        sender: Box::new(sender),
        receiver: Box::new(PipeReceiver { rx }),
    };
    (halves, Inbound { tx })
}

/// Poll `condition` until it holds or `timeout_ms` passes
pub async fn wait_for_condition<F, Fut>(mut condition: F, timeout_ms: u64) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(timeout_ms);

    loop {
        if condition().await {
            return true;
        }

        if start.elapsed() > timeout {
            return false;
        }

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
}
