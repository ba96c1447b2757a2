// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end round trips.
//!
//! `TestHarness` assembles a complete chat session with a mock provider and
//! an in-memory history store. Provides `ask()` to drive the full pipeline
//! in tests.

use std::sync::Arc;

use recall_agent::{ChatOptions, ChatSession};
use recall_config::model::{AgentConfig, BackendConfig, HistoryConfig, RecallConfig};
use recall_core::RecallError;
use recall_core::types::{ConversationScope, Persona};

use crate::memory_store::MemoryHistoryStore;
use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    system_prompt: Option<String>,
    history: HistoryConfig,
    backends: Vec<BackendConfig>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            system_prompt: None,
            history: HistoryConfig::default(),
            backends: Vec::new(),
        }
    }

    /// Set mock provider responses.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Override the history settings.
    pub fn with_history(mut self, history: HistoryConfig) -> Self {
        self.history = history;
        self
    }

    /// Replace the built-in backend table.
    pub fn with_backends(mut self, backends: Vec<BackendConfig>) -> Self {
        self.backends = backends;
        self
    }

    /// Build the test harness.
    pub async fn build(self) -> Result<TestHarness, RecallError> {
        let config = RecallConfig {
            agent: AgentConfig {
                name: "recall-test".to_string(),
                system_prompt: self.system_prompt,
                ..Default::default()
            },
            history: self.history,
            backends: self.backends,
        };

        let provider = MockProvider::with_responses(self.responses);
        let store = MemoryHistoryStore::new();
        let session = ChatSession::from_config(
            &config,
            Arc::new(store.clone()),
            Arc::new(provider.clone()),
        )
        .await?;

        Ok(TestHarness {
            session,
            provider,
            store,
            config,
        })
    }
}

/// A complete chat session wired to mock collaborators.
pub struct TestHarness {
    pub session: ChatSession,
    pub provider: MockProvider,
    pub store: MemoryHistoryStore,
    config: RecallConfig,
}

impl TestHarness {
    /// Create a builder for configuring the test environment.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// The configuration the session was built from.
    pub fn config(&self) -> &RecallConfig {
        &self.config
    }

    /// Ask in a plain chatbot conversation using the configured history
    /// settings.
    pub async fn ask(
        &self,
        user_id: i64,
        question: &str,
        backend_id: &str,
    ) -> Result<String, RecallError> {
        let options = ChatOptions::from_config(&self.config.history);
        self.session
            .ask(&ConversationScope::user(user_id), question, backend_id, options)
            .await
    }

    /// Ask `persona` using the persona history settings.
    pub async fn ask_persona(
        &self,
        user_id: i64,
        persona_id: i64,
        persona: &Persona,
        question: &str,
        backend_id: &str,
    ) -> Result<String, RecallError> {
        let options = ChatOptions::for_persona(&self.config.history);
        self.session
            .ask_persona(
                &ConversationScope::persona(user_id, persona_id),
                persona,
                question,
                backend_id,
                options,
            )
            .await
    }
}
