// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Narrow view of the environment exposed to condition/validation predicates.
//!
//! Predicates live in the event model (so `Event::Condition`/`Event::Validation`
//! can be constructed here), but the concrete `Environment` is owned by
//! `are-env`, which depends on this crate. This trait is the seam that lets
//! a predicate close over "the environment" without `are-core` depending on
//! `are-env` back.

/// Read-only access to simulation state, as seen by a condition or
/// validation predicate.
pub trait EnvironmentView: Send + Sync {
    /// Current virtual time.
    fn time(&self) -> f64;

    /// Snapshot of a registered app's state, by app name, if it exists.
    fn app_state(&self, app_name: &str) -> Option<serde_json::Value>;
}
