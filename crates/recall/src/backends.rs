// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `recall backends` command implementation.

use recall_config::model::RecallConfig;
use recall_core::RecallError;
use recall_router::BackendRegistry;

/// Run the `recall backends` command.
///
/// Lists every registered backend in registration order. With `--json`,
/// prints the backend records for scripting.
pub fn run_backends(config: &RecallConfig, json: bool) -> Result<(), RecallError> {
    let registry = BackendRegistry::from_config(config)?;
    let output = if json {
        render_json(&registry)?
    } else {
        render_table(&registry)
    };
    println!("{output}");
    Ok(())
}

fn render_json(registry: &BackendRegistry) -> Result<String, RecallError> {
    let backends: Vec<_> = registry.iter().collect();
    serde_json::to_string_pretty(&backends)
        .map_err(|e| RecallError::Internal(format!("failed to serialize backends: {e}")))
}

fn render_table(registry: &BackendRegistry) -> String {
    let width = registry
        .identifiers()
        .map(str::len)
        .max()
        .unwrap_or(0)
        .max("BACKEND".len());

    let mut lines = vec![format!("{:<width$}  {:<10}  STREAMING", "BACKEND", "FAMILY")];
    for backend in registry.iter() {
        let streaming = if backend.supports_streaming { "yes" } else { "no" };
        lines.push(format!(
            "{:<width$}  {:<10}  {streaming}",
            backend.identifier,
            backend.family.to_string(),
        ));
    }
    lines.join("\n")
}
