// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Oracle events: the scenario author's ground truth, used by the event
//! judge to decide whether the agent reproduced the expected trace closely
//! enough in both content and timing.
//!
//! Tolerances (`pre`/`post`/`threshold`) are deliberately *not* stored
//! here: they are judge configuration (defaults `pre=10s, post=25s,
//! threshold=1s`), not a property of any one oracle event. Only the
//! *kind* of comparison to run travels with the event.

use serde::{Deserialize, Serialize};

use super::{Event, EventId};

/// How an oracle event's timing should be compared against the matching
/// agent event's timing. `None` (the common case) defaults to `Equal`,
/// but the judge only *enforces* timing at all once the oracle event's
/// relative delay exceeds `check_time_threshold_seconds` — see
/// `are-judge`'s `AgentEventJudge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTimeComparator {
    Equal,
    LessThan,
    GreaterThan,
}

crate::simple_display! {
    EventTimeComparator {
        Equal => "EQUAL",
        LessThan => "LESS_THAN",
        GreaterThan => "GREATER_THAN",
    }
}

/// An expected event from the scenario author's ground-truth trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleEvent {
    pub event: Box<Event>,
    pub event_time_comparator: Option<EventTimeComparator>,
    /// An absolute deadline to compare against instead of a turn-relative
    /// delay, for oracle events authored against a fixed clock time
    /// rather than "N seconds after the previous step".
    pub absolute_event_time: Option<f64>,
}

impl OracleEvent {
    pub fn new(event: Event) -> Self {
        Self { event: Box::new(event), event_time_comparator: None, absolute_event_time: None }
    }

    pub fn with_comparator(mut self, comparator: EventTimeComparator) -> Self {
        self.event_time_comparator = Some(comparator);
        self
    }

    pub fn with_absolute_event_time(mut self, t: f64) -> Self {
        self.absolute_event_time = Some(t);
        self
    }

    pub fn expected_time(&self) -> Option<f64> {
        self.event.event_time()
    }

    pub fn id(&self) -> &EventId {
        self.event.id()
    }
}

/// Authoring helper: turn a captured [`Event`] into ground truth.
pub trait IntoOracle {
    fn oracle(self) -> OracleEvent;
}

impl IntoOracle for Event {
    fn oracle(self) -> OracleEvent {
        OracleEvent::new(self)
    }
}

/// The outcome of replaying one oracle event against the actual event log:
/// which completed event (if any) it was matched to, and whether timing
/// fell inside tolerance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedOracleEvent {
    pub oracle: OracleEvent,
    pub matched_event_id: Option<EventId>,
    pub time_check_passed: bool,
}

impl CompletedOracleEvent {
    pub fn unmatched(oracle: OracleEvent) -> Self {
        Self { oracle, matched_event_id: None, time_check_passed: false }
    }

    pub fn matched(oracle: OracleEvent, event_id: EventId, time_check_passed: bool) -> Self {
        Self { oracle, matched_event_id: Some(event_id), time_check_passed }
    }

    pub fn passed(&self) -> bool {
        self.matched_event_id.is_some() && self.time_check_passed
    }
}

#[cfg(test)]
#[path = "oracle_tests.rs"]
mod tests;
