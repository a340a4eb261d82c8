//! Channel endpoint addressing

/// Origin header presented during the websocket upgrade
pub const ORIGIN: &str = "http://localhost";

/// Build the websocket address of a channel on a server
pub fn channel_url(server: &str, port: &str, channel: &str) -> String {
    format!("ws://{server}:{port}/channel/{channel}")
}
