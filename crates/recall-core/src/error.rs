// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Recall conversation core.

use thiserror::Error;

/// The primary error type shared by the context pipeline, the backend
/// registry, and the collaborator traits.
#[derive(Debug, Error)]
pub enum RecallError {
    /// Empty or malformed new question, or a malformed exchange record
    /// (missing required field) reaching the formatter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Model identifier is not present in the registered backend set.
    #[error("unknown backend `{identifier}`")]
    UnknownBackend { identifier: String },

    /// Opaque passthrough of a model collaborator failure (timeout, rate
    /// limit, auth failure). Never interpreted or retried.
    #[error("dispatch to backend `{backend}` failed: {source}")]
    UpstreamDispatch {
        backend: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (duplicate backend registration, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// History store failures.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RecallError {
    /// Wraps a collaborator failure for the named backend.
    pub fn upstream(
        backend: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        RecallError::UpstreamDispatch {
            backend: backend.into(),
            source: source.into(),
        }
    }

    /// Wraps a history store failure.
    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        RecallError::Storage {
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_backend_names_identifier() {
        let err = RecallError::UnknownBackend {
            identifier: "gpt-unknown-9".into(),
        };
        assert_eq!(err.to_string(), "unknown backend `gpt-unknown-9`");
    }

    #[test]
    fn upstream_keeps_source_message() {
        let err = RecallError::upstream("gemma3:1b", std::io::Error::other("connection reset"));
        let msg = err.to_string();
        assert!(msg.contains("gemma3:1b"));
        assert!(msg.contains("connection reset"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn upstream_accepts_plain_strings() {
        let err = RecallError::upstream("llama-3.1-8b-instant", "rate limited");
        match err {
            RecallError::UpstreamDispatch { backend, source } => {
                assert_eq!(backend, "llama-3.1-8b-instant");
                assert_eq!(source.to_string(), "rate limited");
            }
            other => panic!("expected UpstreamDispatch, got {other:?}"),
        }
    }
}
