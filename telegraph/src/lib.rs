//! Internet telegraph client library
//!
//! Bridges a physical telegraph key to a shared channel on a remote server
//! and drives a local sounder from both the operator's key and the remote
//! key events relayed by the server.

pub mod error;
pub mod types;
pub mod traits;
pub mod config;
pub mod core;
pub mod telegraph_impl;
pub mod services;

// Re-export main types
pub use error::{TelegraphError, TelegraphResult};
pub use types::*;
pub use traits::*;
pub use config::TelegraphConfig;
pub use telegraph_impl::Telegraph;
pub use services::*;
