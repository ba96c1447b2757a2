// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde attributes cannot express: log levels,
//! backend identifier hygiene, and duplicate backend registrations.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::RecallConfig;

/// Log levels accepted by `agent.log_level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns all collected validation errors rather than failing fast.
pub fn validate_config(config: &RecallConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.agent.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` is not one of: {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if let Some(ref path) = config.agent.system_prompt_file
        && path.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "agent.system_prompt_file must not be empty when set".to_string(),
        });
    }

    // Lookup is exact-match, so stray whitespace would make a backend unreachable.
    for (i, backend) in config.backends.iter().enumerate() {
        if backend.identifier.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("backends[{i}].identifier must not be empty"),
            });
        } else if backend.identifier.trim() != backend.identifier {
            errors.push(ConfigError::Validation {
                message: format!(
                    "backends[{i}].identifier `{}` has leading or trailing whitespace",
                    backend.identifier
                ),
            });
        }
    }

    let mut seen = HashSet::new();
    for backend in &config.backends {
        if !seen.insert(backend.identifier.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate backend identifier `{}` in [[backends]] array",
                    backend.identifier
                ),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
