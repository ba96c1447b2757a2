// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `recall config` command implementation.

use recall_config::model::RecallConfig;
use recall_core::RecallError;

/// Run the `recall config` command: print the effective configuration as
/// TOML, with the backend table expanded.
pub fn run_config(config: &RecallConfig) -> Result<(), RecallError> {
    print!("{}", render_config(config)?);
    Ok(())
}

fn render_config(config: &RecallConfig) -> Result<String, RecallError> {
    let mut effective = config.clone();
    if effective.backends.is_empty() {
        effective.backends = config
            .backend_table()
            .into_iter()
            .map(Into::into)
            .collect();
    }
    toml::to_string_pretty(&effective)
        .map_err(|e| RecallError::Internal(format!("failed to serialize config: {e}")))
}
