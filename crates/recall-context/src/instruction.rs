// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System instruction loading.

use recall_config::model::AgentConfig;
use recall_core::error::RecallError;
use tracing::{info, warn};

/// Loads the system instruction following config priority: file > inline > default.
///
/// A configured instruction file that cannot be read fails with
/// [`RecallError::Config`]; a blank one falls through to the inline
/// instruction. The default names the assistant.
pub async fn load_system_instruction(config: &AgentConfig) -> Result<String, RecallError> {
    if let Some(ref file_path) = config.system_prompt_file {
        let content = tokio::fs::read_to_string(file_path).await.map_err(|e| {
            RecallError::Config(format!(
                "cannot read system instruction file `{file_path}`: {e}"
            ))
        })?;
        let trimmed = content.trim();
        if !trimmed.is_empty() {
            info!(path = file_path.as_str(), "loaded system instruction from file");
            return Ok(trimmed.to_string());
        }
        warn!(path = file_path.as_str(), "system instruction file is empty, falling back");
    }

    if let Some(ref prompt) = config.system_prompt
        && !prompt.trim().is_empty()
    {
        return Ok(prompt.clone());
    }

    Ok(format!(
        "You are {}, a helpful assistant. Use the earlier exchanges in this \
         conversation, listed in chronological order, to keep your answers consistent.",
        config.name
    ))
}
