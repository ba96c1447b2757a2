// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Recall conversation core.
//!
//! Defines the exchange and transcript types, the shared error type, and the
//! traits through which the core talks to its two external collaborators:
//! a model provider and a history store.

pub mod error;
pub mod traits;
pub mod types;

pub use error::RecallError;
pub use traits::{HistoryStore, ModelProvider};
pub use types::{
    BackendFamily, ConversationScope, Exchange, ModelBackend, ModelRequest, ModelResponse,
    Persona, PersonaMessage, Role, Sender, TranscriptEntry,
};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn role_display_and_parse() {
        for role in [Role::System, Role::User, Role::Assistant] {
            let parsed = Role::from_str(&role.to_string()).expect("should parse back");
            assert_eq!(role, parsed);
        }
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn backend_family_uses_kebab_case() {
        assert_eq!(BackendFamily::HostedApi.to_string(), "hosted-api");
        assert_eq!(
            BackendFamily::from_str("local").unwrap(),
            BackendFamily::Local
        );
        let json = serde_json::to_string(&BackendFamily::HostedApi).unwrap();
        assert_eq!(json, "\"hosted-api\"");
    }

    #[test]
    fn exchange_completion() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        assert!(Exchange::complete("q", "a", at).is_complete());
        assert!(!Exchange::in_flight("q", at).is_complete());
        // Empty answers are still answers.
        assert!(Exchange::complete("q", "", at).is_complete());
    }

    #[test]
    fn exchange_deserializes_without_answer() {
        let json = r#"{"question": "hi", "created_at": "2026-01-01T12:00:00Z"}"#;
        let exchange: Exchange = serde_json::from_str(json).unwrap();
        assert_eq!(exchange.question, "hi");
        assert!(!exchange.is_complete());
        assert_eq!(exchange.id, None);
    }

    #[test]
    fn exchange_id_is_only_serialized_once_assigned() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let mut exchange = Exchange::complete("q", "a", at);
        assert!(!serde_json::to_string(&exchange).unwrap().contains("\"id\""));

        exchange.id = Some(42);
        let json = serde_json::to_string(&exchange).unwrap();
        let back: Exchange = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, Some(42));
    }

    #[test]
    fn model_request_accessors() {
        let request = ModelRequest {
            model: "gemma3:1b".into(),
            messages: vec![
                TranscriptEntry::system("sys"),
                TranscriptEntry::user("q1"),
                TranscriptEntry::assistant("a1"),
                TranscriptEntry::user("q2"),
            ],
            stream: false,
        };
        assert_eq!(request.instruction().unwrap().content, "sys");
        assert_eq!(request.question().unwrap().content, "q2");
        assert_eq!(request.history().len(), 2);
    }

    #[test]
    fn model_request_history_empty_for_short_requests() {
        let request = ModelRequest {
            model: "m".into(),
            messages: vec![TranscriptEntry::system("sys")],
            stream: false,
        };
        assert!(request.history().is_empty());
    }

    #[test]
    fn persona_scope_carries_persona_id() {
        assert_eq!(ConversationScope::user(7).persona_id, None);
        assert_eq!(ConversationScope::persona(7, 3).persona_id, Some(3));
    }

    #[test]
    fn sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Agent).unwrap(), "\"agent\"");
    }
}
