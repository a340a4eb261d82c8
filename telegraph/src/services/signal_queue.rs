//! Signal queue: the only path to the sounder
//!
//! Many producers (key poller, listen task, playback) push tone commands; the
//! tone driver is the single consumer. Pushing never blocks.

use tokio::sync::mpsc;

use shared::{Component, ToneCommand, component_warn};

/// Producer handle, cheap to clone
#[derive(Debug, Clone)]
pub struct SignalQueue {
    tx: mpsc::UnboundedSender<ToneCommand>,
}

/// Consumer handle, owned by the tone driver
#[derive(Debug)]
pub struct SignalReceiver {
    rx: mpsc::UnboundedReceiver<ToneCommand>,
}

/// Create a connected producer/consumer pair
pub fn signal_queue() -> (SignalQueue, SignalReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SignalQueue { tx }, SignalReceiver { rx })
}

impl SignalQueue {
    pub fn push(&self, command: ToneCommand) {
        if self.tx.send(command).is_err() {
            component_warn!(Component::ToneDriver, "Tone driver gone, dropping {}", command);
        }
    }
}

impl SignalReceiver {
    /// Wait for the next command; `None` once every producer is gone
    pub async fn next(&mut self) -> Option<ToneCommand> {
        self.rx.recv().await
    }

    /// Take everything queued right now without waiting
    pub fn drain(&mut self) -> Vec<ToneCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = self.rx.try_recv() {
            commands.push(command);
        }
        commands
    }
}
