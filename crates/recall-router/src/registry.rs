// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend registry with exact-match selection.
//!
//! Lifecycle: a [`RegistryBuilder`] collects registrations at startup and
//! `build()`s an immutable [`BackendRegistry`]. There is no way back: a
//! built registry cannot be re-registered or torn down.

use std::collections::HashMap;

use recall_config::model::RecallConfig;
use recall_core::error::RecallError;
use recall_core::types::ModelBackend;
use tracing::{info, warn};

/// Collects backend registrations before the registry is ready.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    backends: Vec<ModelBackend>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one backend.
    pub fn register(mut self, backend: ModelBackend) -> Self {
        self.backends.push(backend);
        self
    }

    /// Adds every backend of `table`, in order.
    pub fn register_all(mut self, table: impl IntoIterator<Item = ModelBackend>) -> Self {
        self.backends.extend(table);
        self
    }

    /// Freezes the registrations.
    ///
    /// Fails with [`RecallError::Config`] when nothing was registered, an
    /// identifier is empty, or an identifier was registered twice.
    pub fn build(self) -> Result<BackendRegistry, RecallError> {
        if self.backends.is_empty() {
            return Err(RecallError::Config("no model backends registered".to_string()));
        }

        let mut index = HashMap::with_capacity(self.backends.len());
        for (slot, backend) in self.backends.iter().enumerate() {
            if backend.identifier.is_empty() {
                return Err(RecallError::Config(format!(
                    "backend {slot} has an empty identifier"
                )));
            }
            if index.insert(backend.identifier.clone(), slot).is_some() {
                return Err(RecallError::Config(format!(
                    "backend `{}` registered more than once",
                    backend.identifier
                )));
            }
        }

        info!(count = self.backends.len(), "backend registry ready");

        Ok(BackendRegistry {
            backends: self.backends,
            index,
        })
    }
}

/// The fixed set of model backends a process can dispatch to.
#[derive(Debug, Clone)]
pub struct BackendRegistry {
    backends: Vec<ModelBackend>,
    index: HashMap<String, usize>,
}

impl BackendRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registers `table` and builds the registry in one step.
    pub fn from_table(table: impl IntoIterator<Item = ModelBackend>) -> Result<Self, RecallError> {
        RegistryBuilder::new().register_all(table).build()
    }

    /// Registers the configured backend table (or the built-in one).
    pub fn from_config(config: &RecallConfig) -> Result<Self, RecallError> {
        Self::from_table(config.backend_table())
    }

    /// Returns the backend registered under exactly `identifier`.
    ///
    /// Matching is case-sensitive with no trimming, prefix, or fuzzy
    /// matching, and there is no default: anything not registered fails
    /// with [`RecallError::UnknownBackend`].
    pub fn select(&self, identifier: &str) -> Result<&ModelBackend, RecallError> {
        match self.index.get(identifier) {
            Some(&slot) => Ok(&self.backends[slot]),
            None => {
                warn!(identifier = identifier, "unknown backend requested");
                Err(RecallError::UnknownBackend {
                    identifier: identifier.to_string(),
                })
            }
        }
    }

    /// Registered identifiers in registration order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.backends.iter().map(|b| b.identifier.as_str())
    }

    /// Registered backends in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelBackend> {
        self.backends.iter()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use recall_config::model::default_backend_table;
    use recall_core::types::BackendFamily;

    use super::*;

    fn registry() -> BackendRegistry {
        BackendRegistry::from_table(default_backend_table()).unwrap()
    }

    #[test]
    fn every_default_backend_is_selectable() {
        let registry = registry();
        for backend in default_backend_table() {
            let selected = registry.select(&backend.identifier).unwrap();
            assert_eq!(selected, &backend);
        }
    }

    #[test]
    fn unknown_backend_names_identifier() {
        let err = registry().select("gpt-unknown-9").unwrap_err();
        match err {
            RecallError::UnknownBackend { identifier } => assert_eq!(identifier, "gpt-unknown-9"),
            other => panic!("expected UnknownBackend, got {other:?}"),
        }
    }

    #[test]
    fn empty_identifier_is_unknown() {
        assert!(matches!(
            registry().select(""),
            Err(RecallError::UnknownBackend { .. })
        ));
    }

    #[test]
    fn case_mismatch_is_unknown() {
        assert!(matches!(
            registry().select("Gemma3:1b"),
            Err(RecallError::UnknownBackend { .. })
        ));
        assert!(matches!(
            registry().select("LLAMA-3.1-8B-INSTANT"),
            Err(RecallError::UnknownBackend { .. })
        ));
    }

    #[test]
    fn partial_and_padded_identifiers_are_unknown() {
        let registry = registry();
        assert!(registry.select("gemma3").is_err());
        assert!(registry.select("llama").is_err());
        assert!(registry.select(" gemma3:1b").is_err());
        assert!(registry.select("gemma3:1b ").is_err());
    }

    #[test]
    fn identifiers_keep_registration_order() {
        let registry = BackendRegistry::builder()
            .register(ModelBackend::new("b", BackendFamily::Local, false))
            .register(ModelBackend::new("a", BackendFamily::HostedApi, true))
            .build()
            .unwrap();
        assert_eq!(registry.identifiers().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_registration_fails() {
        let err = BackendRegistry::builder()
            .register(ModelBackend::new("gemma3:1b", BackendFamily::Local, false))
            .register(ModelBackend::new("gemma3:1b", BackendFamily::HostedApi, true))
            .build()
            .unwrap_err();
        assert!(matches!(err, RecallError::Config(msg) if msg.contains("more than once")));
    }

    #[test]
    fn empty_registry_fails() {
        assert!(matches!(
            RegistryBuilder::new().build(),
            Err(RecallError::Config(_))
        ));
    }

    #[test]
    fn empty_identifier_registration_fails() {
        let err = BackendRegistry::from_table([ModelBackend::new("", BackendFamily::Local, false)])
            .unwrap_err();
        assert!(matches!(err, RecallError::Config(_)));
    }

    #[test]
    fn from_config_uses_default_table() {
        let registry = BackendRegistry::from_config(&RecallConfig::default()).unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(
            registry.select("llama3.2:latest").unwrap().family,
            BackendFamily::Local
        );
    }
}
