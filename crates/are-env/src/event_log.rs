// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The append-only record of what actually happened during a run.

use are_core::{CompletedEvent, EventId};
use std::collections::HashMap;
use serde_json::Value;

#[derive(Default)]
pub struct EventLog {
    entries: Vec<CompletedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: CompletedEvent) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[CompletedEvent] {
        &self.entries
    }

    pub fn get(&self, id: &EventId) -> Option<&CompletedEvent> {
        self.entries.iter().find(|e| &e.event_id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Replace the log wholesale, e.g. when restoring an [`crate::Environment`] snapshot.
    pub fn restore(&mut self, entries: Vec<CompletedEvent>) {
        self.entries = entries;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return values recorded so far, keyed by event id, for `{{event_id}}`
    /// placeholder resolution in not-yet-executed actions.
    pub fn return_values(&self) -> HashMap<EventId, Value> {
        self.entries
            .iter()
            .filter_map(|e| Some((e.event_id.clone(), e.return_value()?.clone())))
            .collect()
    }
}

#[cfg(test)]
#[path = "event_log_tests.rs"]
mod tests;
