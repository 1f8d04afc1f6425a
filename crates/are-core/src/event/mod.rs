// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event model: the typed event DAG that drives the simulation.
//!
//! Serializes with `{"event_type": "AGENT", ...}`-shaped tagging. Condition
//! and validation predicates are host-language closures and cannot
//! round-trip through JSON; deserializing one yields an always-true
//! placeholder, a documented limitation of the wire format for condition
//! actions.

mod action;
mod completed;
mod condition;
mod oracle;
mod validation;

pub use action::{resolve_placeholders, Action, OperationType};
pub use completed::{CompletedEvent, EventMetadata};
pub use condition::{ConditionEvent, ConditionPredicate};
pub use oracle::{CompletedOracleEvent, EventTimeComparator, IntoOracle, OracleEvent};
pub use validation::{Milestone, ValidationEvent};

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for an event, stable across runs when scenario-authored.
    pub struct EventId("evt-");
}

/// Type of the event, i.e. who initiated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    User,
    Env,
    Agent,
    Condition,
    Validation,
    Stop,
}

crate::simple_display! {
    EventType {
        User => "USER",
        Env => "ENV",
        Agent => "AGENT",
        Condition => "CONDITION",
        Validation => "VALIDATION",
        Stop => "STOP",
    }
}

/// Fields shared by every event variant (formerly Python's `AbstractEvent`
/// base dataclass — Rust prefers composition over inheritance here).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMeta {
    pub event_id: EventId,
    pub event_time: Option<f64>,
    pub event_relative_time: Option<f64>,
    pub dependencies: Vec<EventId>,
    pub successors: Vec<EventId>,
}

impl EventMeta {
    pub fn new(event_id: EventId) -> Self {
        Self {
            event_id,
            event_time: None,
            event_relative_time: None,
            dependencies: Vec::new(),
            successors: Vec::new(),
        }
    }
}

/// An event that carries a tool-call `Action` (USER, ENV, or AGENT).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEvent {
    pub meta: EventMeta,
    pub action: Option<Action>,
}

/// The event sum type: USER, ENV, AGENT, CONDITION, VALIDATION, STOP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum Event {
    User(ActionEvent),
    Env(ActionEvent),
    Agent(ActionEvent),
    Condition(ConditionEvent),
    Validation(ValidationEvent),
    Stop(EventMeta),
}

impl Event {
    pub fn user(meta: EventMeta, action: Option<Action>) -> Self {
        Event::User(ActionEvent { meta, action })
    }

    pub fn env(meta: EventMeta, action: Option<Action>) -> Self {
        Event::Env(ActionEvent { meta, action })
    }

    pub fn agent(meta: EventMeta, action: Option<Action>) -> Self {
        Event::Agent(ActionEvent { meta, action })
    }

    pub fn stop(meta: EventMeta) -> Self {
        Event::Stop(meta)
    }

    pub fn event_type(&self) -> EventType {
        match self {
            Event::User(_) => EventType::User,
            Event::Env(_) => EventType::Env,
            Event::Agent(_) => EventType::Agent,
            Event::Condition(_) => EventType::Condition,
            Event::Validation(_) => EventType::Validation,
            Event::Stop(_) => EventType::Stop,
        }
    }

    pub fn meta(&self) -> &EventMeta {
        match self {
            Event::User(e) | Event::Env(e) | Event::Agent(e) => &e.meta,
            Event::Condition(c) => &c.meta,
            Event::Validation(v) => &v.meta,
            Event::Stop(m) => m,
        }
    }

    pub fn meta_mut(&mut self) -> &mut EventMeta {
        match self {
            Event::User(e) | Event::Env(e) | Event::Agent(e) => &mut e.meta,
            Event::Condition(c) => &mut c.meta,
            Event::Validation(v) => &mut v.meta,
            Event::Stop(m) => m,
        }
    }

    pub fn id(&self) -> &EventId {
        &self.meta().event_id
    }

    pub fn event_time(&self) -> Option<f64> {
        self.meta().event_time
    }

    pub fn dependencies(&self) -> &[EventId] {
        &self.meta().dependencies
    }

    pub fn successors(&self) -> &[EventId] {
        &self.meta().successors
    }

    pub fn action(&self) -> Option<&Action> {
        match self {
            Event::User(e) | Event::Env(e) | Event::Agent(e) => e.action.as_ref(),
            _ => None,
        }
    }

    /// I4: every AGENT event must have at least one dependency.
    pub fn requires_dependency(&self) -> bool {
        matches!(self, Event::Agent(_))
    }

    /// Add `deps` as dependencies of `self`, scheduled `delay_seconds` after
    /// all of them complete. Rejects a negative delay (I2).
    pub fn depends_on(&mut self, deps: &mut [&mut Event], delay_seconds: f64) {
        assert!(delay_seconds >= 0.0, "delay must be non-negative, got {delay_seconds}");
        self.meta_mut().event_relative_time = Some(delay_seconds);
        let self_id = self.id().clone();
        for dep in deps.iter_mut() {
            dep.meta_mut().successors.push(self_id.clone());
            self.meta_mut().dependencies.push(dep.id().clone());
        }
    }

    /// Symmetric helper: `self` is followed by `events`, each after its own delay.
    pub fn followed_by(&mut self, events: &mut [&mut Event], delay_seconds: &[f64]) {
        assert_eq!(events.len(), delay_seconds.len(), "events and delays must have equal length");
        assert!(delay_seconds.iter().all(|&d| d >= 0.0), "delay must be non-negative");
        let self_id = self.id().clone();
        for (event, &delay) in events.iter_mut().zip(delay_seconds) {
            event.meta_mut().event_relative_time = Some(delay);
            event.meta_mut().dependencies.push(self_id.clone());
            self.meta_mut().successors.push(event.id().clone());
        }
    }

    /// True once the event is ready to be placed on the event queue: either
    /// its absolute time is already set, or it has no unresolved dependency.
    pub fn is_ready(&self, resolved_times: &std::collections::HashMap<EventId, f64>) -> bool {
        let meta = self.meta();
        if meta.event_time.is_some() {
            return true;
        }
        meta.dependencies.is_empty()
            || meta.dependencies.iter().all(|d| resolved_times.contains_key(d))
    }

    /// Resolve `event_time` from `start_time` and the (already-resolved)
    /// absolute times of dependencies, per I1.
    pub fn resolve_absolute_time(
        &mut self,
        start_time: f64,
        resolved_times: &std::collections::HashMap<EventId, f64>,
    ) {
        let meta = self.meta_mut();
        if meta.event_time.is_some() {
            return;
        }
        let relative = meta.event_relative_time.unwrap_or(0.0);
        if meta.dependencies.is_empty() {
            meta.event_time = Some(start_time + relative);
            return;
        }
        let max_dep_time = meta
            .dependencies
            .iter()
            .filter_map(|d| resolved_times.get(d).copied())
            .fold(f64::NEG_INFINITY, f64::max);
        meta.event_time = Some(max_dep_time + relative);
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
