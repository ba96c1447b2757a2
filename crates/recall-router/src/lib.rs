// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model backend selection for Recall.
//!
//! This crate provides:
//! - [`RegistryBuilder`]: collects backend registrations at startup
//! - [`BackendRegistry`]: the built, read-only registry with exact-match
//!   [`select`](BackendRegistry::select)
//!
//! Selection happens before any history is loaded or any model is called,
//! so an unknown identifier never costs a round trip.

pub mod registry;

pub use registry::{BackendRegistry, RegistryBuilder};
