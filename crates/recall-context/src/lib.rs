// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation context assembly for Recall.
//!
//! Turns stored history plus a new question into a model-ready prompt:
//! - **Window**: keep the most recent complete exchanges
//! - **Transcript**: render them as alternating user/assistant entries
//! - **Assembler**: put the system instruction first and the question last
//!
//! Every step is a pure, synchronous function of its inputs. The
//! [`ContextEngine`] runs them in order for one request.

pub mod assembler;
pub mod instruction;
pub mod persona;
pub mod transcript;
pub mod window;

use recall_config::model::AgentConfig;
use recall_core::error::RecallError;
use recall_core::types::{Exchange, Persona};
use tracing::debug;

pub use assembler::{PromptContext, assemble, validate_question};
pub use instruction::load_system_instruction;
pub use persona::{pair_messages, persona_instruction};
pub use transcript::{format_transcript, render_lines};
pub use window::{ensure_chronological, select_window};

/// Runs window selection, transcript formatting, and prompt assembly for
/// one request against a fixed system instruction.
#[derive(Debug, Clone)]
pub struct ContextEngine {
    instruction: String,
}

impl ContextEngine {
    /// Creates an engine around an explicit system instruction.
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
        }
    }

    /// Creates an engine whose instruction comes from agent config.
    pub async fn from_config(config: &AgentConfig) -> Result<Self, RecallError> {
        Ok(Self::new(load_system_instruction(config).await?))
    }

    /// Creates an engine speaking as `persona`.
    pub fn for_persona(persona: &Persona) -> Self {
        Self::new(persona_instruction(persona))
    }

    /// The system instruction placed first in every prompt.
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Assembles a prompt from `history` (oldest first), keeping at most
    /// `window` complete exchanges, followed by `question`.
    ///
    /// Fails without producing anything if the question is empty or the
    /// history is not chronological.
    pub fn assemble(
        &self,
        history: &[Exchange],
        window: usize,
        question: &str,
    ) -> Result<PromptContext, RecallError> {
        ensure_chronological(history)?;

        let selected = select_window(history, window);
        let kept = selected.len();
        let transcript = format_transcript(selected)?;

        debug!(
            stored = history.len(),
            window = window,
            kept = kept,
            entries = transcript.len(),
            "assembled conversation window"
        );

        assemble(&self.instruction, transcript, question)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use recall_core::types::{Role, TranscriptEntry};
    use tracing_test::traced_test;

    use super::*;

    fn history(total: usize) -> Vec<Exchange> {
        let base = Utc.with_ymd_and_hms(2026, 4, 10, 8, 0, 0).unwrap();
        (0..total)
            .map(|i| {
                Exchange::complete(
                    format!("q{i}"),
                    format!("a{i}"),
                    base + Duration::minutes(i as i64),
                )
            })
            .collect()
    }

    #[test]
    fn empty_history_gives_instruction_and_question() {
        let engine = ContextEngine::new("sys");
        let prompt = engine.assemble(&[], 10, "Q").unwrap();
        assert_eq!(
            prompt.messages(),
            &[TranscriptEntry::system("sys"), TranscriptEntry::user("Q")]
        );
    }

    #[test]
    fn window_bounds_transcript() {
        let engine = ContextEngine::new("sys");
        let prompt = engine.assemble(&history(7), 3, "next").unwrap();
        let contents: Vec<&str> = prompt
            .transcript()
            .iter()
            .map(|e| e.content.as_str())
            .collect();
        assert_eq!(contents, ["q4", "a4", "q5", "a5", "q6", "a6"]);
        assert_eq!(prompt.question().content, "next");
    }

    #[test]
    fn zero_window_is_the_no_history_path() {
        let engine = ContextEngine::new("sys");
        let prompt = engine.assemble(&history(4), 0, "fresh start").unwrap();
        assert!(prompt.is_history_free());
    }

    #[test]
    fn in_flight_tail_is_ignored() {
        let mut stored = history(3);
        stored.push(Exchange::in_flight(
            "pending",
            stored[2].created_at + Duration::minutes(1),
        ));
        let prompt = ContextEngine::new("sys")
            .assemble(&stored, 10, "Q")
            .unwrap();
        assert_eq!(prompt.transcript().len(), 6);
        assert!(prompt.transcript().iter().all(|e| e.content != "pending"));
    }

    #[test]
    fn unordered_history_is_rejected() {
        let mut stored = history(3);
        stored.reverse();
        let err = ContextEngine::new("sys")
            .assemble(&stored, 10, "Q")
            .unwrap_err();
        assert!(matches!(err, RecallError::InvalidInput(_)));
    }

    #[test]
    fn empty_question_is_rejected_even_with_history() {
        let err = ContextEngine::new("sys")
            .assemble(&history(2), 10, "")
            .unwrap_err();
        assert!(matches!(err, RecallError::InvalidInput(_)));
    }

    #[test]
    fn persona_engine_uses_persona_instruction() {
        let persona = Persona {
            name: "Ada".into(),
            tone: "precise".into(),
            summary: String::new(),
        };
        let prompt = ContextEngine::for_persona(&persona)
            .assemble(&[], 5, "hi")
            .unwrap();
        assert_eq!(prompt.instruction().role, Role::System);
        assert!(prompt.instruction().content.contains("You are Ada."));
    }

    #[traced_test]
    #[test]
    fn assembly_logs_window_statistics() {
        ContextEngine::new("sys")
            .assemble(&history(5), 2, "Q")
            .unwrap();
        assert!(logs_contain("assembled conversation window"));
        assert!(logs_contain("kept=2"));
    }

    #[tokio::test]
    async fn from_config_uses_inline_prompt() {
        let config = AgentConfig {
            system_prompt: Some("Configured.".into()),
            ..Default::default()
        };
        let engine = ContextEngine::from_config(&config).await.unwrap();
        assert_eq!(engine.instruction(), "Configured.");
    }
}
