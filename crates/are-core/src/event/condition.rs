// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Condition events: a predicate re-polled on every tick until it holds,
//! a timeout is hit, or the environment stops.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{Event, EventId, EventMeta};
use crate::env_view::EnvironmentView;

/// A predicate closed over "the environment", re-evaluated once per tick.
///
/// The closure itself cannot be serialized; only `name` round-trips through
/// the scenario format, and a deserialized predicate always evaluates to
/// `true` the first time it is polled. This mirrors how condition checks
/// are authored in-process rather than loaded from a saved scenario file.
#[derive(Clone)]
pub struct ConditionPredicate {
    pub name: String,
    pub f: Arc<dyn Fn(&dyn EnvironmentView) -> bool + Send + Sync>,
}

impl ConditionPredicate {
    pub fn new(name: impl Into<String>, f: impl Fn(&dyn EnvironmentView) -> bool + Send + Sync + 'static) -> Self {
        Self { name: name.into(), f: Arc::new(f) }
    }

    pub fn evaluate(&self, env: &dyn EnvironmentView) -> bool {
        (self.f)(env)
    }

    fn always_true() -> Arc<dyn Fn(&dyn EnvironmentView) -> bool + Send + Sync> {
        Arc::new(|_| true)
    }
}

impl std::fmt::Debug for ConditionPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionPredicate").field("name", &self.name).finish()
    }
}

impl Serialize for ConditionPredicate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for ConditionPredicate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self { name, f: Self::always_true() })
    }
}

/// CONDITION event: scheduled every `schedule_every_ticks` ticks until the
/// predicate holds or `timeout_ticks` elapses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionEvent {
    pub meta: EventMeta,
    pub predicate: ConditionPredicate,
    pub schedule_every_ticks: u32,
    pub timeout_ticks: Option<u32>,
    pub check_count: u32,
}

impl ConditionEvent {
    pub fn new(meta: EventMeta, predicate: ConditionPredicate) -> Self {
        Self { meta, predicate, schedule_every_ticks: 1, timeout_ticks: None, check_count: 0 }
    }

    pub fn with_schedule_every_ticks(mut self, n: u32) -> Self {
        self.schedule_every_ticks = n.max(1);
        self
    }

    pub fn with_timeout_ticks(mut self, n: u32) -> Self {
        self.timeout_ticks = Some(n);
        self
    }

    /// Poll the predicate, bumping the internal check counter. Returns
    /// `true` once satisfied.
    pub fn poll(&mut self, env: &dyn EnvironmentView) -> bool {
        self.check_count += 1;
        self.predicate.evaluate(env)
    }

    pub fn has_timed_out(&self) -> bool {
        matches!(self.timeout_ticks, Some(limit) if self.check_count >= limit)
    }

    /// Build the next poll of this condition: same predicate and config,
    /// rescheduled at `next_time`, with the event id renamed to carry a
    /// `-CHECK_<n>` suffix so each poll is individually addressable in the
    /// event log rather than all sharing the original id.
    pub fn next_check(&self, next_time: f64) -> Event {
        let mut next = self.clone();
        next.meta.event_id = EventId::from_string(format!("{}-CHECK_{}", self.base_id(), self.check_count));
        next.meta.event_time = Some(next_time);
        Event::Condition(next)
    }

    fn base_id(&self) -> String {
        let id = self.meta.event_id.as_str();
        match id.rfind("-CHECK_") {
            Some(idx) => id[..idx].to_string(),
            None => id.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
