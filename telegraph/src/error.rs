//! Telegraph error types

use thiserror::Error;
use shared::SharedError;

/// Result type for telegraph operations
pub type TelegraphResult<T> = Result<T, TelegraphError>;

/// Telegraph error types
#[derive(Error, Debug)]
pub enum TelegraphError {
    #[error("Failed to dial {url}: {message}")]
    Dial { url: String, message: String },

    #[error("Dial to {url} timed out after {timeout_ms} ms")]
    DialTimeout { url: String, timeout_ms: u64 },

    #[error("Send failed: {message}")]
    Send { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("GPIO error on pin {pin}: {message}")]
    Gpio { pin: u32, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Protocol error: {0}")]
    Protocol(#[from] SharedError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
