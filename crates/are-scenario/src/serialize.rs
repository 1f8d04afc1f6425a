// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The serialized scenario wire format: a JSON document an author can
//! hand-write or a pipeline can generate, loaded into a `ScenarioBuilder`
//! and re-validated before use.
//!
//! `are_core::Event` already serializes as an internally-tagged enum
//! (`{"event_type": ..., "meta": {...}, "action": {...}}`), and
//! duplicating that shape by hand here would just be a second, divergent
//! schema for the same data. This wraps that existing representation
//! rather than re-deriving it; see DESIGN.md for the tradeoff.

use are_core::{AuthoringError, Event, OracleEvent};
use serde::{Deserialize, Serialize};

use crate::turn::validate_turn_times;
use crate::validate::validate_dag;

/// A scenario's full on-disk shape: its event DAG plus an optional oracle
/// trace. Round-trips through `serde_json` unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub name: String,
    pub events: Vec<Event>,
    #[serde(default)]
    pub oracle_events: Vec<OracleEvent>,
}

impl ScenarioFile {
    pub fn new(name: impl Into<String>, events: Vec<Event>) -> Self {
        Self { name: name.into(), events, oracle_events: Vec::new() }
    }

    pub fn with_oracle_events(mut self, oracle_events: Vec<OracleEvent>) -> Self {
        self.oracle_events = oracle_events;
        self
    }

    /// Validate the loaded event flow's DAG invariants and turn-time rule
    /// before handing it to an `Environment`.
    pub fn validate(&self) -> Result<(), AuthoringError> {
        validate_dag(&self.events)?;
        validate_turn_times(&self.events)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
#[path = "serialize_tests.rs"]
mod tests;
