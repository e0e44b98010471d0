//! Shared test utilities for dsgsync integration tests.
//!
//! This module provides:
//! - `TestHarness` for running the download pipeline against a fake portal
//! - Builders for selections and link candidates

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::{FakePortal, RecordingFetcher, TestHarness};
