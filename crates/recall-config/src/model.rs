// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Recall conversation core.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use recall_core::types::{BackendFamily, ModelBackend};
use serde::{Deserialize, Serialize};

/// Top-level Recall configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RecallConfig {
    /// Assistant identity and system instruction.
    #[serde(default)]
    pub agent: AgentConfig,

    /// History windowing defaults.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Registered model backends. Empty means the built-in table.
    #[serde(default)]
    pub backends: Vec<BackendConfig>,
}

impl RecallConfig {
    /// The backend table to register at startup.
    pub fn backend_table(&self) -> Vec<ModelBackend> {
        if self.backends.is_empty() {
            return default_backend_table();
        }
        self.backends.iter().map(BackendConfig::to_backend).collect()
    }
}

/// Assistant identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Inline system instruction. Overridden by `system_prompt_file` if both set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a file containing the system instruction.
    #[serde(default)]
    pub system_prompt_file: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            system_prompt: None,
            system_prompt_file: None,
        }
    }
}

fn default_agent_name() -> String {
    "recall".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// History windowing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Whether chat requests include prior exchanges by default.
    #[serde(default = "default_use_history")]
    pub use_history: bool,

    /// Default window size for chatbot conversations.
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Default window size for persona conversations.
    #[serde(default = "default_persona_max_history")]
    pub persona_max_history: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            use_history: default_use_history(),
            max_history: default_max_history(),
            persona_max_history: default_persona_max_history(),
        }
    }
}

fn default_use_history() -> bool {
    true
}

fn default_max_history() -> usize {
    10
}

fn default_persona_max_history() -> usize {
    20
}

/// One entry of the `[[backends]]` table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Exact model identifier callers select the backend by.
    pub identifier: String,

    /// `hosted-api` or `local`.
    pub family: BackendFamily,

    /// Whether the backend can stream partial output.
    #[serde(default)]
    pub supports_streaming: bool,
}

impl BackendConfig {
    fn to_backend(&self) -> ModelBackend {
        ModelBackend::new(self.identifier.clone(), self.family, self.supports_streaming)
    }
}

impl From<ModelBackend> for BackendConfig {
    fn from(backend: ModelBackend) -> Self {
        Self {
            identifier: backend.identifier,
            family: backend.family,
            supports_streaming: backend.supports_streaming,
        }
    }
}

/// Built-in backend table used when `[[backends]]` is empty.
pub fn default_backend_table() -> Vec<ModelBackend> {
    vec![
        ModelBackend::new("llama-3.1-8b-instant", BackendFamily::HostedApi, true),
        ModelBackend::new("llama-3.3-70b-versatile", BackendFamily::HostedApi, true),
        ModelBackend::new("gemini-2.5-flash-lite", BackendFamily::HostedApi, false),
        ModelBackend::new("llama3.2:latest", BackendFamily::Local, false),
        ModelBackend::new("gemma3:1b", BackendFamily::Local, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_backends_use_default_table() {
        let config = RecallConfig::default();
        let table = config.backend_table();
        assert_eq!(table.len(), 5);
        assert_eq!(table[0].identifier, "llama-3.1-8b-instant");
        assert_eq!(table[4].family, BackendFamily::Local);
    }

    #[test]
    fn configured_backends_replace_default_table() {
        let toml_str = r#"
[[backends]]
identifier = "mistral:7b"
family = "local"
"#;
        let config: RecallConfig = toml::from_str(toml_str).unwrap();
        let table = config.backend_table();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].identifier, "mistral:7b");
        assert!(!table[0].supports_streaming);
    }

    #[test]
    fn unknown_family_is_rejected() {
        let toml_str = r#"
[[backends]]
identifier = "x"
family = "cloud"
"#;
        assert!(toml::from_str::<RecallConfig>(toml_str).is_err());
    }

    #[test]
    fn history_defaults() {
        let history = HistoryConfig::default();
        assert!(history.use_history);
        assert_eq!(history.max_history, 10);
        assert_eq!(history.persona_max_history, 20);
    }
}
