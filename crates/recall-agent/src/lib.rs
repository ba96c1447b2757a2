// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation round trips for Recall.
//!
//! The [`ChatSession`] ties the context pipeline to its collaborators:
//! - Selects the requested backend from the registry
//! - Loads the scope's stored history and assembles the prompt
//! - Dispatches through the model provider
//! - Persists the completed exchange on success

pub mod session;

pub use session::{ChatOptions, ChatSession};
