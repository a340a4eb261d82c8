//! Common test utilities for the telegraph test suites
//!
//! Each test binary uses a different subset of these.
#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::TestFixtures;
pub use helpers::{LinkScript, MemoryServer, RecordingSounder, ScriptedKey, TelegraphBuilder, wait_for_condition};
