//! Shared error types for the internet telegraph

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Empty message")]
    EmptyMessage,

    #[error("Invalid key token: {token:?}")]
    InvalidKeyToken { token: char },

    #[error("Invalid timestamp in message: {input}")]
    InvalidTimestamp { input: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
