//! Telegraph services implementations

pub mod signal_queue;
pub mod tone_driver;
pub mod playback;
pub mod connection_manager;
pub mod websocket_transport;
pub mod gpio;

#[cfg(test)]
pub mod tests;

pub use signal_queue::*;
pub use tone_driver::*;
pub use playback::*;
pub use connection_manager::*;
pub use websocket_transport::*;
pub use gpio::*;
