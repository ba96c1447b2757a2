// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory history store.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use recall_core::RecallError;
use recall_core::traits::HistoryStore;
use recall_core::types::{ConversationScope, Exchange};

/// Keeps every scope's exchanges in memory, ordered by `created_at`.
///
/// Counts `load` calls so tests can assert that a request never reached
/// the store.
#[derive(Clone)]
pub struct MemoryHistoryStore {
    conversations: Arc<Mutex<HashMap<ConversationScope, Vec<Exchange>>>>,
    next_id: Arc<AtomicI64>,
    loads: Arc<AtomicUsize>,
    fail_appends: Arc<AtomicBool>,
}

impl Default for MemoryHistoryStore {
    fn default() -> Self {
        Self {
            conversations: Arc::default(),
            next_id: Arc::new(AtomicI64::new(1)),
            loads: Arc::default(),
            fail_appends: Arc::default(),
        }
    }
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `scope` with existing exchanges, stored as given.
    pub async fn seed(&self, scope: ConversationScope, exchanges: Vec<Exchange>) {
        self.conversations
            .lock()
            .await
            .entry(scope)
            .or_default()
            .extend(exchanges);
    }

    /// Snapshot of what is stored for `scope`.
    pub async fn exchanges(&self, scope: &ConversationScope) -> Vec<Exchange> {
        self.conversations
            .lock()
            .await
            .get(scope)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of `load` calls so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Makes every subsequent `append` fail.
    pub fn fail_appends(&self) {
        self.fail_appends.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn load(&self, scope: &ConversationScope) -> Result<Vec<Exchange>, RecallError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.exchanges(scope).await)
    }

    async fn append(
        &self,
        scope: &ConversationScope,
        mut exchange: Exchange,
    ) -> Result<i64, RecallError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(RecallError::storage(std::io::Error::other(
                "history store is read-only",
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        exchange.id = Some(id);

        let mut conversations = self.conversations.lock().await;
        let stored = conversations.entry(*scope).or_default();
        let slot = stored.partition_point(|e| e.created_at <= exchange.created_at);
        stored.insert(slot, exchange);
        Ok(id)
    }

    async fn count(&self, scope: &ConversationScope) -> Result<usize, RecallError> {
        Ok(self
            .conversations
            .lock()
            .await
            .get(scope)
            .map_or(0, Vec::len))
    }

    async fn clear(&self, scope: &ConversationScope) -> Result<usize, RecallError> {
        Ok(self
            .conversations
            .lock()
            .await
            .remove(scope)
            .map_or(0, |removed| removed.len()))
    }

    async fn delete(&self, scope: &ConversationScope, id: i64) -> Result<bool, RecallError> {
        let mut conversations = self.conversations.lock().await;
        let Some(stored) = conversations.get_mut(scope) else {
            return Ok(false);
        };
        match stored.iter().position(|e| e.id == Some(id)) {
            Some(slot) => {
                stored.remove(slot);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
