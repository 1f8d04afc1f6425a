// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation events: milestones that must all fire, and minefields that
//! must never fire, within a timeout window.

use serde::{Deserialize, Serialize};

use super::condition::ConditionPredicate;
use super::EventMeta;
use crate::env_view::EnvironmentView;

/// A named predicate checked against scenario progress. Used both as a
/// milestone (must become true) and a minefield (must never become true).
pub type Milestone = ConditionPredicate;

/// VALIDATION event: polls `milestones` and `minefields` every tick.
/// Succeeds once every milestone has fired at least once; fails
/// immediately if any minefield fires, or if `timeout_ticks` elapses
/// before all milestones have fired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationEvent {
    pub meta: EventMeta,
    pub milestones: Vec<Milestone>,
    pub minefields: Vec<Milestone>,
    pub timeout_ticks: Option<u32>,
    pub achieved: Vec<String>,
    pub check_count: u32,
}

impl ValidationEvent {
    pub fn new(meta: EventMeta, milestones: Vec<Milestone>) -> Self {
        Self {
            meta,
            milestones,
            minefields: Vec::new(),
            timeout_ticks: None,
            achieved: Vec::new(),
            check_count: 0,
        }
    }

    pub fn with_minefields(mut self, minefields: Vec<Milestone>) -> Self {
        self.minefields = minefields;
        self
    }

    pub fn with_timeout_ticks(mut self, n: u32) -> Self {
        self.timeout_ticks = Some(n);
        self
    }

    /// Poll every milestone and minefield. Returns the name of the first
    /// minefield that fires, if any; otherwise `None`.
    pub fn poll(&mut self, env: &dyn EnvironmentView) -> Option<String> {
        self.check_count += 1;
        for milestone in &self.milestones {
            if self.achieved.iter().any(|a| a == &milestone.name) {
                continue;
            }
            if milestone.evaluate(env) {
                self.achieved.push(milestone.name.clone());
            }
        }
        for minefield in &self.minefields {
            if minefield.evaluate(env) {
                return Some(minefield.name.clone());
            }
        }
        None
    }

    pub fn is_complete(&self) -> bool {
        self.milestones.iter().all(|m| self.achieved.contains(&m.name))
    }

    pub fn has_timed_out(&self) -> bool {
        matches!(self.timeout_ticks, Some(limit) if self.check_count >= limit)
    }

    pub fn unachieved_milestones(&self) -> Vec<String> {
        self.milestones
            .iter()
            .map(|m| &m.name)
            .filter(|name| !self.achieved.contains(name))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
