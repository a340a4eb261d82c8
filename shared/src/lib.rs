//! Shared types for the internet telegraph
//!
//! Contains the wire protocol spoken with the channel server, the tone and
//! pin vocabulary used by every task, and the logging bootstrap.

pub mod types;
pub mod errors;
pub mod logging;
pub mod messages;

pub use types::*;
pub use errors::*;

pub use messages::{
    // Client → server
    KeyEvent, KeyToken, OutboundMessage, KEEPALIVE, VERSION_TAG,

    // Server → client
    parse_inbound,

    // Addressing
    channel_url, ORIGIN,
};
