//! Tone driver: sole owner of the sounder outputs

use tokio::task::JoinHandle;

use shared::{Component, ToneCommand, component_debug, component_error, component_warn};
use crate::services::signal_queue::SignalReceiver;
use crate::traits::SounderOutput;

/// Applies tone commands to the sounder pin(s) strictly in arrival order
pub struct ToneDriver {
    primary: Box<dyn SounderOutput>,
    inverted: Option<Box<dyn SounderOutput>>,
    last_command: ToneCommand,
}

impl ToneDriver {
    pub fn new(primary: Box<dyn SounderOutput>, inverted: Option<Box<dyn SounderOutput>>) -> Self {
        Self {
            primary,
            inverted,
            last_command: ToneCommand::SoundOff,
        }
    }

    pub fn last_command(&self) -> ToneCommand {
        self.last_command
    }

    /// Write one command to the primary pin and its complement to the
    /// inverted pin, if there is one
    pub fn apply(&mut self, command: ToneCommand) {
        let level = command.level();
        if let Err(e) = self.primary.write(level) {
            component_error!(Component::ToneDriver, "Failed to drive sounder {}: {}", level, e);
        }
        if let Some(inverted) = self.inverted.as_mut() {
            if let Err(e) = inverted.write(!level) {
                component_error!(Component::ToneDriver, "Failed to drive inverted sounder {}: {}", !level, e);
            }
        }

        component_debug!(Component::ToneDriver, "🔊 {}", command);
        self.last_command = command;
    }

    /// Drain the queue until every producer has gone away
    pub async fn run(mut self, mut signals: SignalReceiver) {
        while let Some(command) = signals.next().await {
            self.apply(command);
        }
        component_warn!(Component::ToneDriver, "Signal queue closed, tone driver stopping");
    }

    pub fn spawn(self, signals: SignalReceiver) -> JoinHandle<()> {
        tokio::spawn(self.run(signals))
    }
}
