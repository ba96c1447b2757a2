// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Recall configuration system.

use std::io::Write;

use recall_config::diagnostic::ConfigError;
use recall_config::model::RecallConfig;
use recall_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use recall_core::types::BackendFamily;

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_recall_config() {
    let toml = r#"
[agent]
name = "helper"
log_level = "debug"
system_prompt = "Be brief."

[history]
use_history = false
max_history = 4
persona_max_history = 8

[[backends]]
identifier = "llama-3.1-8b-instant"
family = "hosted-api"
supports_streaming = true

[[backends]]
identifier = "gemma3:1b"
family = "local"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "helper");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.agent.system_prompt.as_deref(), Some("Be brief."));
    assert!(!config.history.use_history);
    assert_eq!(config.history.max_history, 4);
    assert_eq!(config.history.persona_max_history, 8);
    assert_eq!(config.backends.len(), 2);
    assert_eq!(config.backends[0].family, BackendFamily::HostedApi);
    assert!(config.backends[0].supports_streaming);
    assert_eq!(config.backends[1].family, BackendFamily::Local);
    assert!(!config.backends[1].supports_streaming);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.agent.name, "recall");
    assert_eq!(config.agent.log_level, "info");
    assert!(config.agent.system_prompt.is_none());
    assert!(config.history.use_history);
    assert_eq!(config.history.max_history, 10);
    assert!(config.backends.is_empty());
    assert_eq!(config.backend_table().len(), 5);
}

/// A typo in [history] is reported as an unknown key with a suggestion.
#[test]
fn unknown_history_key_suggests_correction() {
    let toml = r#"
[history]
max_histroy = 3
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "max_histroy");
            assert_eq!(suggestion.as_deref(), Some("max_history"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// A backend entry without an identifier reports the missing key.
#[test]
fn backend_without_identifier_is_missing_key() {
    let toml = r#"
[[backends]]
family = "local"
"#;
    let errors = load_and_validate_str(toml).expect_err("identifier is required");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { key } if key.ends_with("identifier"))),
        "got: {errors:?}"
    );
}

/// Unknown backend family is an invalid value, not a silent default.
#[test]
fn unknown_backend_family_is_rejected() {
    let toml = r#"
[[backends]]
identifier = "x"
family = "cloud"
"#;
    let errors = load_and_validate_str(toml).expect_err("family must be known");
    assert!(!errors.is_empty());
}

/// Semantic validation runs after successful deserialization.
#[test]
fn duplicate_backends_fail_validation() {
    let toml = r#"
[[backends]]
identifier = "gemma3:1b"
family = "local"

[[backends]]
identifier = "gemma3:1b"
family = "local"
"#;
    let errors = load_and_validate_str(toml).expect_err("duplicates are rejected");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("gemma3:1b"))
    ));
}

/// Explicit config files are loaded and validated.
#[test]
fn load_from_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[agent]\nname = \"from-file\"\n").unwrap();

    let config: RecallConfig = load_and_validate_path(file.path()).expect("file should load");
    assert_eq!(config.agent.name, "from-file");
}

/// Errors from an explicit file still get typo suggestions.
#[test]
fn explicit_path_errors_suggest_correction() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[agent]\nnaem = \"x\"\n").unwrap();

    let errors = load_and_validate_path(file.path()).expect_err("typo should fail");
    match &errors[0] {
        ConfigError::UnknownKey { key, suggestion, .. } => {
            assert_eq!(key, "naem");
            assert_eq!(suggestion.as_deref(), Some("name"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// A missing explicit file is an error naming the path, not silent defaults.
#[test]
fn missing_explicit_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let errors = load_and_validate_path(&path).expect_err("missing file should fail");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::FileNotFound { path: reported } => {
            assert_eq!(reported, &path.display().to_string());
        }
        other => panic!("expected FileNotFound, got {other:?}"),
    }
    assert!(errors[0].to_string().contains("absent.toml"));
}
