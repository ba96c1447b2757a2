// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Recall integration tests.
//!
//! Provides mock collaborators and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock model provider with queued replies and failures
//! - [`MemoryHistoryStore`] - In-memory history store with call counting
//! - [`TestHarness`] - A full chat session wired to both

pub mod harness;
pub mod memory_store;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use memory_store::MemoryHistoryStore;
pub use mock_provider::MockProvider;
