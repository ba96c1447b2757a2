// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History window selection.
//!
//! Bounds a chronologically ordered conversation to its most recent
//! complete exchanges. Selection only ever truncates from the oldest end;
//! the kept exchanges stay in their original order.

use recall_core::error::RecallError;
use recall_core::types::Exchange;

/// Returns the most recent `min(k, n_complete)` complete exchanges of
/// `history`, oldest first.
///
/// Exchanges still waiting for an answer never enter the window. `k == 0`
/// means no history was requested and yields an empty window. The input is
/// only borrowed; the returned references point into it.
pub fn select_window(history: &[Exchange], k: usize) -> Vec<&Exchange> {
    if k == 0 {
        return Vec::new();
    }

    let mut window: Vec<&Exchange> = history
        .iter()
        .rev()
        .filter(|exchange| exchange.is_complete())
        .take(k)
        .collect();
    window.reverse();
    window
}

/// Checks that `history` is ordered by `created_at` (ties allowed).
///
/// Windowing is only defined over chronological input; the persistence
/// collaborator owns the ordering, this just refuses to work on a broken one.
pub fn ensure_chronological(history: &[Exchange]) -> Result<(), RecallError> {
    if let Some(pos) = history
        .windows(2)
        .position(|pair| pair[1].created_at < pair[0].created_at)
    {
        return Err(RecallError::InvalidInput(format!(
            "history is not chronological: exchange {} is older than exchange {}",
            pos + 1,
            pos
        )));
    }
    Ok(())
}
