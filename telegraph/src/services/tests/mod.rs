//! Tests for telegraph services
//!
//! These tests verify the functionality of all telegraph service components,
//! using mocks and in-memory pipes in place of pins and sockets.

pub mod helpers;

// Re-export test utilities
pub use crate::traits::*;
