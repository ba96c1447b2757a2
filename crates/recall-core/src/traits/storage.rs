// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History store trait for conversation persistence backends.

use async_trait::async_trait;

use crate::error::RecallError;
use crate::types::{ConversationScope, Exchange};

/// Persistence collaborator holding the exchanges of each conversation.
#[async_trait]
pub trait HistoryStore: Send + Sync + 'static {
    /// Returns every stored exchange for `scope`, oldest first.
    async fn load(&self, scope: &ConversationScope) -> Result<Vec<Exchange>, RecallError>;

    /// Stores a completed exchange in `scope`'s conversation, keeping it
    /// ordered by `created_at` (ties go after existing exchanges), and
    /// returns the record id assigned to it.
    async fn append(&self, scope: &ConversationScope, exchange: Exchange)
    -> Result<i64, RecallError>;

    /// Number of exchanges stored for `scope`.
    async fn count(&self, scope: &ConversationScope) -> Result<usize, RecallError>;

    /// Removes every exchange of `scope` and returns how many were removed.
    async fn clear(&self, scope: &ConversationScope) -> Result<usize, RecallError>;

    /// Removes the exchange stored under `id` in `scope`. Returns `false`
    /// when `scope` holds no such exchange.
    async fn delete(&self, scope: &ConversationScope, id: i64) -> Result<bool, RecallError>;
}
