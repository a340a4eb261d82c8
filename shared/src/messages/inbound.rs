//! Server → client messages
//!
//! Only the leading character of an inbound message carries meaning; the rest
//! (timestamp, version tag, sender metadata) is relayed for other clients.

use crate::types::ToneCommand;

/// Translate an inbound message into a remote tone command.
///
/// Returns `None` for anything that does not start with `0` or `1`; such
/// messages are ignored rather than treated as errors.
pub fn parse_inbound(message: &str) -> Option<ToneCommand> {
    match message.chars().next() {
        Some('0') => Some(ToneCommand::SoundOff),
        Some('1') => Some(ToneCommand::SoundOn),
        _ => None,
    }
}
