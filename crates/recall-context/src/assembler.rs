// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly: instruction, transcript, and new question in one request.

use recall_core::error::RecallError;
use recall_core::types::{ModelBackend, ModelRequest, TranscriptEntry};

/// A fully assembled, per-request prompt.
///
/// The message list always starts with the system instruction and ends with
/// the new question; transcript entries sit in between in their original
/// order. Built fresh for every request and consumed when it is turned into
/// a [`ModelRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    messages: Vec<TranscriptEntry>,
}

impl PromptContext {
    /// All entries in dispatch order.
    pub fn messages(&self) -> &[TranscriptEntry] {
        &self.messages
    }

    /// The system instruction entry.
    pub fn instruction(&self) -> &TranscriptEntry {
        &self.messages[0]
    }

    /// The new question entry.
    pub fn question(&self) -> &TranscriptEntry {
        &self.messages[self.messages.len() - 1]
    }

    /// Prior-turn entries between instruction and question.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.messages[1..self.messages.len() - 1]
    }

    /// True when no prior turns were included.
    pub fn is_history_free(&self) -> bool {
        self.messages.len() == 2
    }

    /// Binds the prompt to a backend, producing the request handed to the
    /// model provider.
    pub fn into_request(self, backend: &ModelBackend) -> ModelRequest {
        ModelRequest {
            model: backend.identifier.clone(),
            messages: self.messages,
            stream: backend.supports_streaming,
        }
    }
}

/// Rejects a question that is empty or only whitespace.
pub fn validate_question(question: &str) -> Result<(), RecallError> {
    if question.trim().is_empty() {
        return Err(RecallError::InvalidInput(
            "question must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Assembles `instruction`, `transcript`, and `question` into a prompt.
///
/// An empty transcript is the normal no-history path and produces
/// `[instruction, question]`. A question that is empty or only whitespace
/// fails with [`RecallError::InvalidInput`] and nothing is produced.
pub fn assemble(
    instruction: &str,
    transcript: Vec<TranscriptEntry>,
    question: &str,
) -> Result<PromptContext, RecallError> {
    validate_question(question)?;

    let mut messages = Vec::with_capacity(transcript.len() + 2);
    messages.push(TranscriptEntry::system(instruction));
    messages.extend(transcript);
    messages.push(TranscriptEntry::user(question));

    Ok(PromptContext { messages })
}
