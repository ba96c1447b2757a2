// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock model provider for deterministic testing.
//!
//! `MockProvider` implements `ModelProvider` with pre-configured outcomes,
//! enabling fast, CI-runnable tests without any inference backend.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use recall_core::RecallError;
use recall_core::traits::ModelProvider;
use recall_core::types::{ModelBackend, ModelRequest, ModelResponse};

/// One queued provider outcome.
#[derive(Debug, Clone)]
enum Outcome {
    Reply(String),
    Fail(String),
}

/// A mock provider that replays queued outcomes and records every request.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned.
#[derive(Clone, Default)]
pub struct MockProvider {
    outcomes: Arc<Mutex<VecDeque<Outcome>>>,
    requests: Arc<Mutex<Vec<ModelRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(
                responses.into_iter().map(Outcome::Reply).collect(),
            )),
            requests: Arc::default(),
        }
    }

    /// Queue a reply.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Outcome::Reply(text.into()));
    }

    /// Queue a dispatch failure with the given upstream message.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.outcomes.lock().await.push_back(Outcome::Fail(message.into()));
    }

    /// Every request received so far, in order.
    pub async fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of `complete` calls so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    async fn complete(
        &self,
        backend: &ModelBackend,
        request: ModelRequest,
    ) -> Result<ModelResponse, RecallError> {
        self.requests.lock().await.push(request);

        let outcome = self
            .outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Outcome::Reply("mock response".to_string()));

        match outcome {
            Outcome::Reply(content) => Ok(ModelResponse {
                content,
                model: backend.identifier.clone(),
            }),
            Outcome::Fail(message) => Err(RecallError::upstream(
                backend.identifier.clone(),
                std::io::Error::other(message),
            )),
        }
    }
}
