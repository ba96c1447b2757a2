// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcript formatting: windowed exchanges to role-tagged entries.

use recall_core::error::RecallError;
use recall_core::types::{Exchange, TranscriptEntry};

/// Formats a windowed, chronologically ordered sequence of exchanges.
///
/// Each exchange yields a user entry for its question immediately followed
/// by an assistant entry for its answer, so the output strictly alternates
/// starting with the user. Empty strings are kept as entries. An exchange
/// with no answer is a malformed record at this stage and fails the whole
/// call.
pub fn format_transcript<'a, I>(window: I) -> Result<Vec<TranscriptEntry>, RecallError>
where
    I: IntoIterator<Item = &'a Exchange>,
{
    let window = window.into_iter();
    let mut entries = Vec::with_capacity(window.size_hint().0 * 2);

    for (position, exchange) in window.enumerate() {
        let Some(answer) = exchange.answer.as_ref() else {
            return Err(RecallError::InvalidInput(format!(
                "exchange {position} has no answer and cannot be formatted"
            )));
        };
        entries.push(TranscriptEntry::user(exchange.question.clone()));
        entries.push(TranscriptEntry::assistant(answer.clone()));
    }

    Ok(entries)
}

/// Renders entries as `role: content` lines, one per entry.
///
/// This is the flat form used when the history is embedded into a single
/// text prompt instead of being sent as separate messages.
pub fn render_lines(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{}: {}", entry.role, entry.content))
        .collect::<Vec<_>>()
        .join("\n")
}
