// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One question-and-answer round trip against a stored conversation.
//!
//! A round trip goes through these steps, failing fast at each:
//! validate question -> select backend -> load history -> assemble ->
//! dispatch -> persist. Nothing is persisted unless dispatch succeeds.

use std::sync::Arc;

use chrono::Utc;
use recall_config::model::{HistoryConfig, RecallConfig};
use recall_context::{ContextEngine, validate_question};
use recall_core::error::RecallError;
use recall_core::traits::{HistoryStore, ModelProvider};
use recall_core::types::{ConversationScope, Exchange, Persona};
use recall_router::BackendRegistry;
use tracing::{debug, info};

/// Per-request history settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatOptions {
    /// Whether stored exchanges are included at all.
    pub use_history: bool,
    /// Maximum number of complete exchanges to include.
    pub max_history: usize,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            use_history: true,
            max_history: 10,
        }
    }
}

impl ChatOptions {
    /// Options for plain chatbot conversations.
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self {
            use_history: config.use_history,
            max_history: config.max_history,
        }
    }

    /// Options for persona conversations, which keep a longer window.
    pub fn for_persona(config: &HistoryConfig) -> Self {
        Self {
            use_history: config.use_history,
            max_history: config.persona_max_history,
        }
    }

    /// Options that ignore stored history entirely.
    pub fn without_history() -> Self {
        Self {
            use_history: false,
            max_history: 0,
        }
    }

    /// Effective window size.
    pub fn window(&self) -> usize {
        if self.use_history { self.max_history } else { 0 }
    }
}

/// Answers questions against stored conversations.
///
/// Holds the backend registry, the history store, the model provider, and
/// the default context engine. All collaborators are shared, so one
/// session can serve concurrent requests for different scopes.
pub struct ChatSession {
    registry: Arc<BackendRegistry>,
    store: Arc<dyn HistoryStore>,
    provider: Arc<dyn ModelProvider>,
    engine: ContextEngine,
}

impl ChatSession {
    pub fn new(
        registry: Arc<BackendRegistry>,
        store: Arc<dyn HistoryStore>,
        provider: Arc<dyn ModelProvider>,
        engine: ContextEngine,
    ) -> Self {
        Self {
            registry,
            store,
            provider,
            engine,
        }
    }

    /// Builds a session from configuration: the backend table becomes the
    /// registry and the agent section supplies the system instruction.
    pub async fn from_config(
        config: &RecallConfig,
        store: Arc<dyn HistoryStore>,
        provider: Arc<dyn ModelProvider>,
    ) -> Result<Self, RecallError> {
        let registry = BackendRegistry::from_config(config)?;
        let engine = ContextEngine::from_config(&config.agent).await?;

        info!(
            agent_name = config.agent.name.as_str(),
            backends = registry.len(),
            provider = provider.name(),
            "chat session initialized"
        );

        Ok(Self::new(Arc::new(registry), store, provider, engine))
    }

    /// The backends this session can dispatch to.
    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// The engine used by [`ask`](Self::ask).
    pub fn engine(&self) -> &ContextEngine {
        &self.engine
    }

    /// Asks `question` in `scope` using backend `backend_id` and returns
    /// the trimmed answer.
    ///
    /// Unknown backends and empty questions fail before the history store
    /// is touched. Dispatch failures come back unchanged and leave the
    /// stored conversation as it was.
    pub async fn ask(
        &self,
        scope: &ConversationScope,
        question: &str,
        backend_id: &str,
        options: ChatOptions,
    ) -> Result<String, RecallError> {
        self.round_trip(&self.engine, scope, question, backend_id, options)
            .await
    }

    /// Like [`ask`](Self::ask), but speaking as `persona`.
    pub async fn ask_persona(
        &self,
        scope: &ConversationScope,
        persona: &Persona,
        question: &str,
        backend_id: &str,
        options: ChatOptions,
    ) -> Result<String, RecallError> {
        let engine = ContextEngine::for_persona(persona);
        self.round_trip(&engine, scope, question, backend_id, options)
            .await
    }

    /// Number of exchanges stored for `scope`.
    pub async fn history_count(&self, scope: &ConversationScope) -> Result<usize, RecallError> {
        self.store.count(scope).await
    }

    /// Removes every stored exchange of `scope` and returns how many went.
    pub async fn clear_history(&self, scope: &ConversationScope) -> Result<usize, RecallError> {
        let removed = self.store.clear(scope).await?;
        info!(
            user_id = scope.user_id,
            persona_id = ?scope.persona_id,
            removed = removed,
            "conversation history cleared"
        );
        Ok(removed)
    }

    /// Removes one stored exchange of `scope`.
    ///
    /// Fails with [`RecallError::InvalidInput`] when `scope` holds no
    /// exchange with that id.
    pub async fn delete_exchange(
        &self,
        scope: &ConversationScope,
        id: i64,
    ) -> Result<(), RecallError> {
        if !self.store.delete(scope, id).await? {
            return Err(RecallError::InvalidInput(format!(
                "no exchange {id} in this conversation"
            )));
        }
        debug!(user_id = scope.user_id, exchange_id = id, "exchange deleted");
        Ok(())
    }

    async fn round_trip(
        &self,
        engine: &ContextEngine,
        scope: &ConversationScope,
        question: &str,
        backend_id: &str,
        options: ChatOptions,
    ) -> Result<String, RecallError> {
        validate_question(question)?;
        let backend = self.registry.select(backend_id)?;

        let window = options.window();
        let history = if window > 0 {
            self.store.load(scope).await?
        } else {
            Vec::new()
        };

        let request = engine
            .assemble(&history, window, question)?
            .into_request(backend);

        debug!(
            user_id = scope.user_id,
            persona_id = ?scope.persona_id,
            backend = backend.identifier.as_str(),
            messages = request.messages.len(),
            stream = request.stream,
            "dispatching request"
        );

        let response = self.provider.complete(backend, request).await?;
        let answer = response.content.trim().to_string();

        // created_at is the completion time; overlapping asks in one scope
        // are stored in the order they finished.
        let exchange = Exchange::complete(question, answer.clone(), Utc::now());
        let id = self.store.append(scope, exchange).await?;

        info!(
            user_id = scope.user_id,
            persona_id = ?scope.persona_id,
            backend = backend.identifier.as_str(),
            exchange_id = id,
            "exchange recorded"
        );

        Ok(answer)
    }
}
