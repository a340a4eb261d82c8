//! Message types for the telegraph channel protocol
//!
//! - `outbound`: key-edge events and keep-alives sent to the channel server
//! - `inbound`: remote tone commands relayed by the server
//! - `channel`: channel endpoint addressing

pub mod outbound;
pub mod inbound;
pub mod channel;

pub use outbound::{KeyEvent, KeyToken, OutboundMessage, KEEPALIVE, VERSION_TAG};

pub use inbound::parse_inbound;

pub use channel::{channel_url, ORIGIN};
