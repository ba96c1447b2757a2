// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona conversations.
//!
//! Persona data is always passed in explicitly; nothing here keeps a
//! "current character" between requests.

use recall_core::error::RecallError;
use recall_core::types::{Exchange, Persona, PersonaMessage, Sender};

/// Builds the system instruction for a conversation with `persona`.
pub fn persona_instruction(persona: &Persona) -> String {
    let mut instruction = format!("You are {}.\nYour tone: {}\n", persona.name, persona.tone);
    let summary = persona.summary.trim();
    if !summary.is_empty() {
        instruction.push_str("\nProfile:\n");
        instruction.push_str(summary);
        instruction.push('\n');
    }
    instruction.push_str(&format!(
        "\nReply as {}, keeping the same tone.",
        persona.name
    ));
    instruction
}

/// Pairs sender-tagged persona messages into exchanges.
///
/// A user message followed by an agent message becomes one complete
/// exchange stamped with the user message's time. A user message that is
/// not answered before the next user message (or the end of the list)
/// becomes an in-flight exchange. An agent message with no open user
/// message is a malformed record.
pub fn pair_messages(messages: &[PersonaMessage]) -> Result<Vec<Exchange>, RecallError> {
    let mut exchanges = Vec::with_capacity(messages.len() / 2 + 1);
    let mut open: Option<&PersonaMessage> = None;

    for (position, msg) in messages.iter().enumerate() {
        match msg.sender {
            Sender::User => {
                if let Some(unanswered) = open.replace(msg) {
                    exchanges.push(Exchange::in_flight(
                        unanswered.message.clone(),
                        unanswered.created_at,
                    ));
                }
            }
            Sender::Agent => {
                let Some(question) = open.take() else {
                    return Err(RecallError::InvalidInput(format!(
                        "agent message {position} has no preceding user message"
                    )));
                };
                exchanges.push(Exchange::complete(
                    question.message.clone(),
                    msg.message.clone(),
                    question.created_at,
                ));
            }
        }
    }

    if let Some(unanswered) = open {
        exchanges.push(Exchange::in_flight(
            unanswered.message.clone(),
            unanswered.created_at,
        ));
    }

    Ok(exchanges)
}
