//! Todo API Integration Tests
//!
//! These tests run against a deployed API stage. Set `TODO_API_URL` and
//! `TODO_API_TOKEN` (optionally through a `.env` file); without them every
//! test is skipped.
//!
//! Run with: cargo test --package todo-integration-tests

pub mod client;
pub mod fixtures;

pub use client::TodoClient;
pub use fixtures::*;
