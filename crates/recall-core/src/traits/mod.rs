// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits at the boundary of the conversation core.
//!
//! Model dispatch and history persistence are opaque collaborators; both
//! use `#[async_trait]` for dynamic dispatch compatibility.

pub mod provider;
pub mod storage;

pub use provider::ModelProvider;
pub use storage::HistoryStore;
