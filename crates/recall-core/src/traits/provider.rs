// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model provider trait for hosted and local completion backends.

use async_trait::async_trait;

use crate::error::RecallError;
use crate::types::{ModelBackend, ModelRequest, ModelResponse};

/// Adapter that sends an assembled request to a model backend.
///
/// Implementations decide once how to extract the response text from the
/// vendor result and return it as a [`ModelResponse`]. Failures should be
/// reported as [`RecallError::UpstreamDispatch`]; callers propagate them
/// unchanged.
#[async_trait]
pub trait ModelProvider: Send + Sync + 'static {
    /// Human-readable adapter name, used in logs.
    fn name(&self) -> &str;

    /// Sends the request to `backend` and returns the completed text.
    async fn complete(
        &self,
        backend: &ModelBackend,
        request: ModelRequest,
    ) -> Result<ModelResponse, RecallError>;
}
