//! Common test utilities and fixtures for lint-report integration tests
//!
//! This module provides:
//! - `TestRepo` builder for creating project trees and running the CLI
//! - `ScriptedEngine` that replays canned engine output in-process
//! - Custom assertions for checkstyle and JSON output

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod scripted_engine;

pub use assertions::*;
pub use scripted_engine::{ScriptedEngine, ScriptedEngines};
pub use test_repo::TestRepo;
