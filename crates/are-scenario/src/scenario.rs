// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Scenario` trait: a scenario author's single entry point, grounding
//! the three things a scenario must supply — its apps, its event DAG,
//! and (optionally) its oracle trace.

use are_apps::ToolRegistry;
use are_core::{AuthoringError, Event, OracleEvent};

use crate::turn::validate_turn_times;
use crate::validate::validate_dag;

/// Outcome of validating a scenario's event flow: every invariant
/// violation found, not just the first — an author iterating on a
/// scenario wants the whole list in one pass rather than a fix-one,
/// rerun, fix-the-next loop.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<AuthoringError>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A scenario: the apps it needs, the event DAG that drives it, and
/// optionally a ground-truth oracle trace a judge can compare an agent's
/// run against. Implemented once per task (see `are-apps::demo` apps and
/// the end-to-end scenarios under `tests/specs/`).
pub trait Scenario: Send + Sync {
    /// Human-readable scenario name, used in judge reports and CLI output.
    fn name(&self) -> &str;

    /// Build and register every app this scenario's events may call.
    fn init_and_populate_apps(&self) -> ToolRegistry;

    /// The full event DAG: USER/ENV/AGENT/CONDITION/VALIDATION/STOP events
    /// with their dependencies and timing already set. `registry` is the
    /// one returned by [`Scenario::init_and_populate_apps`]; authors may
    /// call [`are_apps::ToolRegistry::capture`] against it to build an
    /// `Action`-carrying event without actually running the tool.
    fn build_events_flow(&self, registry: &ToolRegistry) -> Vec<Event>;

    /// The ground-truth trace a judge compares an agent's log against.
    /// Scenarios with only milestone-style validation (no structural
    /// oracle, e.g. a vacation-mode scenario) return an empty vec.
    fn oracle_events(&self) -> Vec<OracleEvent> {
        Vec::new()
    }

    /// Re-check every DAG invariant (I1-I7) and the turn-time rule against
    /// the current event flow. Call after any authoring-time edit.
    fn validate(&self) -> ValidationResult {
        let registry = self.init_and_populate_apps();
        let events = self.build_events_flow(&registry);
        let mut errors = Vec::new();
        if let Err(err) = validate_dag(&events) {
            errors.push(err);
        }
        if let Err(err) = validate_turn_times(&events) {
            errors.push(err);
        }
        ValidationResult { errors }
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
