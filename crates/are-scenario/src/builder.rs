// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ScenarioBuilder`: an in-memory, re-validated event list for scenarios
//! that construct their DAG programmatically rather than loading it from
//! a [`crate::serialize::ScenarioFile`].
//!
//! This deliberately does not reuse `are_apps::capture::EventRegisterer`.
//! That type suppresses nested tool-call capture while an outer call is
//! already being recorded at *runtime*; authoring a scenario is a
//! compile-time, non-executing activity with no environment to register
//! against, so `ScenarioBuilder` just appends `Event` values directly.

use are_core::{AuthoringError, Event, EventId};

use crate::turn::validate_turn_times;
use crate::validate::validate_dag;

/// A mutable, append-mostly event list with re-validation on every write.
#[derive(Debug, Default, Clone)]
pub struct ScenarioBuilder {
    events: Vec<Event>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Append `event`, then re-validate the whole DAG. On failure the
    /// event is rolled back, leaving the builder unchanged.
    pub fn add_event(&mut self, event: Event) -> Result<(), AuthoringError> {
        self.events.push(event);
        if let Err(err) = self.revalidate() {
            self.events.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Replace the event with the given id via `edit`, then re-validate.
    /// Rolled back on failure, same as `add_event`.
    pub fn edit_event(&mut self, id: &EventId, edit: impl FnOnce(&mut Event)) -> Result<(), AuthoringError> {
        let Some(position) = self.events.iter().position(|e| e.id() == id) else {
            return Err(AuthoringError::UnknownDependency(id.clone(), id.clone()));
        };
        let before = self.events[position].clone();
        edit(&mut self.events[position]);
        if let Err(err) = self.revalidate() {
            self.events[position] = before;
            return Err(err);
        }
        Ok(())
    }

    /// Remove the event with the given id, then re-validate — a removal
    /// can break invariants too (e.g. it can orphan a dependent AGENT
    /// event, violating I4).
    pub fn delete_event(&mut self, id: &EventId) -> Result<(), AuthoringError> {
        let Some(position) = self.events.iter().position(|e| e.id() == id) else {
            return Err(AuthoringError::UnknownDependency(id.clone(), id.clone()));
        };
        let removed = self.events.remove(position);
        if let Err(err) = self.revalidate() {
            self.events.insert(position, removed);
            return Err(err);
        }
        Ok(())
    }

    fn revalidate(&self) -> Result<(), AuthoringError> {
        validate_dag(&self.events)?;
        validate_turn_times(&self.events)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
