// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The event log's record type: what actually happened, as opposed to what
//! was scheduled to happen.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Action, EventId, EventType};

/// Outcome metadata for a single completed event: the tool's return value
/// or the exception (and optional stack trace) it raised, whether the
/// event actually ran to completion, and when.
///
/// `completed` is distinct from "no exception": a CONDITION/VALIDATION
/// poll that hasn't been satisfied yet is logged with `completed: false`
/// and `exception: None`, so a log reader can tell "still polling" apart
/// from "the tool threw" even though neither carries a return value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    pub completion_time: f64,
    pub return_value: Option<Value>,
    pub exception: Option<String>,
    pub stack_trace: Option<String>,
    pub completed: bool,
}

impl EventMetadata {
    pub fn success(completion_time: f64, return_value: Value) -> Self {
        Self { completion_time, return_value: Some(return_value), exception: None, stack_trace: None, completed: true }
    }

    pub fn failure(completion_time: f64, exception: impl Into<String>) -> Self {
        Self { completion_time, return_value: None, exception: Some(exception.into()), stack_trace: None, completed: true }
    }

    pub fn failure_with_trace(completion_time: f64, exception: impl Into<String>, stack_trace: impl Into<String>) -> Self {
        Self { completion_time, return_value: None, exception: Some(exception.into()), stack_trace: Some(stack_trace.into()), completed: true }
    }

    /// A CONDITION/VALIDATION poll that has not yet resolved: not an
    /// exception, not a success, just not done yet.
    pub fn in_progress(completion_time: f64) -> Self {
        Self { completion_time, return_value: None, exception: None, stack_trace: None, completed: false }
    }

    pub fn is_success(&self) -> bool {
        self.completed && self.exception.is_none()
    }
}

/// One row of the event log: the event's identity and type, the action it
/// carried (if any), and the metadata recording how it resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedEvent {
    pub event_id: EventId,
    pub event_type: EventType,
    pub action: Option<Action>,
    pub metadata: EventMetadata,
}

impl CompletedEvent {
    pub fn new(event_id: EventId, event_type: EventType, action: Option<Action>, metadata: EventMetadata) -> Self {
        Self { event_id, event_type, action, metadata }
    }

    pub fn is_success(&self) -> bool {
        self.metadata.is_success()
    }

    pub fn return_value(&self) -> Option<&Value> {
        self.metadata.return_value.as_ref()
    }
}

#[cfg(test)]
#[path = "completed_tests.rs"]
mod tests;
