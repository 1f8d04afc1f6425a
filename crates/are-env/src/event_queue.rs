// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The scheduling half of the event loop: a priority queue of ready events
//! plus a holding area for events still waiting on a dependency.

use are_core::{Event, EventId, PriorityQueue};
use std::collections::HashMap;

/// Ready events ordered by `(event_time, event_id)`, plus pending events
/// whose dependencies have not all resolved yet.
pub struct EventQueue {
    start_time: f64,
    ready: PriorityQueue<Event>,
    pending: HashMap<EventId, Event>,
    resolved_times: HashMap<EventId, f64>,
}

impl EventQueue {
    pub fn new(start_time: f64) -> Self {
        Self {
            start_time,
            ready: PriorityQueue::new(),
            pending: HashMap::new(),
            resolved_times: HashMap::new(),
        }
    }

    /// Schedule `event`, resolving its absolute time if every dependency
    /// it has is already resolved; otherwise park it in `pending` until
    /// [`EventQueue::mark_resolved`] promotes it.
    pub fn schedule(&mut self, mut event: Event) {
        event.resolve_absolute_time(self.start_time, &self.resolved_times);
        if event.is_ready(&self.resolved_times) {
            let time = event.event_time().unwrap_or(self.start_time);
            let id = event.id().to_string();
            self.ready.push(time, id, event);
        } else {
            self.pending.insert(event.id().clone(), event);
        }
    }

    /// Record that `id` completed at `time`, promoting any pending event
    /// whose dependencies are now all resolved.
    pub fn mark_resolved(&mut self, id: EventId, time: f64) {
        self.resolved_times.insert(id, time);

        let newly_ready: Vec<EventId> = self
            .pending
            .iter()
            .filter(|(_, event)| event.is_ready(&self.resolved_times))
            .map(|(id, _)| id.clone())
            .collect();

        for ready_id in newly_ready {
            if let Some(event) = self.pending.remove(&ready_id) {
                self.schedule(event);
            }
        }
    }

    /// Reschedule an already-ready CONDITION/VALIDATION event that needs
    /// another poll, bypassing dependency resolution (it has none left to
    /// resolve by definition).
    pub fn reschedule_at(&mut self, mut event: Event, time: f64) {
        event.meta_mut().event_time = Some(time);
        let id = event.id().to_string();
        self.ready.push(time, id, event);
    }

    /// Reschedule a CONDITION/VALIDATION poll whose id changed (see
    /// [`are_core::ConditionEvent::next_check`]). Any pending event still
    /// waiting on `old_id` is re-pointed onto `new_event`'s id first, since
    /// the old id will now never resolve.
    pub fn reschedule_renamed(&mut self, old_id: &EventId, new_event: Event) {
        let new_id = new_event.id().clone();
        for pending in self.pending.values_mut() {
            for dep in pending.meta_mut().dependencies.iter_mut() {
                if dep == old_id {
                    *dep = new_id.clone();
                }
            }
        }
        let time = new_event.event_time().unwrap_or(self.start_time);
        self.ready.push(time, new_id.to_string(), new_event);
    }

    pub fn pop_ready(&mut self) -> Option<Event> {
        self.ready.pop().map(|(_, _, event)| event)
    }

    pub fn peek_time(&self) -> Option<f64> {
        self.ready.peek().map(|(time, _)| time)
    }

    pub fn is_empty(&self) -> bool {
        self.ready.is_empty() && self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
#[path = "event_queue_tests.rs"]
mod tests;
