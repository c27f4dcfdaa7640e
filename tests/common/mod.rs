//! Common test utilities for viewcache integration tests.
//!
//! This module provides:
//! - `TestEnv`: an isolated application root in a temp directory
//! - Fixtures: reusable view sources
//! - `wait_until`: polling helper for watcher-driven assertions

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
