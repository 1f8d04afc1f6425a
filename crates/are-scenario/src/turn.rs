// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turn assignment: a "turn" is the span between consecutive
//! `send_message_to_user` calls, plus the turn-time accumulation rule
//! that governs how an AGENT event's relative delay composes with other
//! events in the same turn.

use std::collections::HashMap;

use are_core::{AuthoringError, Event, EventId};

use crate::graph::toposort;
use crate::validate::is_send_message_to_user;

/// A turn index: 0 for every event up to and including the first
/// `send_message_to_user` reply, 1 for the span up to the second, etc.
pub type TurnIdx = usize;

/// Assign every event a turn index by walking the DAG in topological
/// (causal) order and incrementing the running counter immediately after
/// a `send_message_to_user` event is assigned. Events that are causally
/// unordered relative to a `send_message_to_user` call (e.g. branch off
/// an earlier dependency) inherit whichever turn their topological
/// position falls in, which is what the accumulated-time rule below
/// assumes.
pub fn recompute_turn_idx(events: &[Event]) -> Result<HashMap<EventId, TurnIdx>, AuthoringError> {
    let order = toposort(events)?;
    let by_id: HashMap<&EventId, &Event> = events.iter().map(|e| (e.id(), e)).collect();

    let mut turn_idx = HashMap::with_capacity(events.len());
    let mut current_turn: TurnIdx = 0;
    for id in &order {
        turn_idx.insert(id.clone(), current_turn);
        if let Some(event) = by_id.get(id) {
            if is_send_message_to_user(event) {
                current_turn += 1;
            }
        }
    }
    Ok(turn_idx)
}

/// Validate that every event's predecessors all belong to the same turn.
/// An event that mixes dependencies from two different turns would make
/// "the current turn" ambiguous for the accumulated-time rule below.
pub fn validate_predecessor_turns(events: &[Event]) -> Result<(), AuthoringError> {
    let turn_idx = recompute_turn_idx(events)?;

    for event in events {
        let mut predecessor_turns = event.meta().dependencies.iter().filter_map(|dep| turn_idx.get(dep));
        let Some(first) = predecessor_turns.next() else { continue };
        if predecessor_turns.any(|turn| turn != first) {
            return Err(AuthoringError::TurnTimeViolation(
                event.id().clone(),
                "predecessors span more than one turn".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validate the turn-time rule. Within a turn where some event's
/// `event_relative_time` exceeds 1 second:
/// - a non-`send_message_to_user` event's accumulated time (its resolved
///   `event_time` minus the turn's earliest resolved `event_time`) must not
///   exceed the turn's closing `send_message_to_user`'s own accumulated time.
/// - the closing `send_message_to_user` itself must have accumulated time
///   exactly equal to the max accumulated time among the turn's other
///   events (not merely bounded by it).
///
/// Turns where every event's relative time is 0 or 1 second are exempt —
/// the rule only engages once a turn has a "slow" event to bound against.
/// Requires `event_time` to already be resolved on every event (see
/// `Event::resolve_absolute_time`).
pub fn validate_turn_times(events: &[Event]) -> Result<(), AuthoringError> {
    validate_predecessor_turns(events)?;

    let turn_idx = recompute_turn_idx(events)?;

    let mut by_turn: HashMap<TurnIdx, Vec<&Event>> = HashMap::new();
    for event in events {
        if let Some(turn) = turn_idx.get(event.id()) {
            by_turn.entry(*turn).or_default().push(event);
        }
    }

    for (turn, members) in &by_turn {
        let resolved: Vec<(&Event, f64)> = members
            .iter()
            .filter_map(|e| e.event_time().map(|t| (*e, t)))
            .collect();
        if resolved.len() < 2 {
            continue;
        }

        let has_slow_event = members.iter().any(|e| matches!(e.meta().event_relative_time, Some(d) if d > 1.0));
        if !has_slow_event {
            continue;
        }

        let Some(closing) = members.iter().find(|e| is_send_message_to_user(e)) else {
            // A turn with no closing send_message_to_user yet (the final,
            // still-open turn) has nothing to bound against.
            continue;
        };
        let Some(closing_time) = closing.event_time() else {
            continue;
        };

        let turn_start = resolved.iter().map(|(_, t)| *t).fold(f64::INFINITY, f64::min);
        let closing_accumulated = closing_time - turn_start;

        let others_accumulated: Vec<f64> =
            resolved.iter().filter(|(e, _)| e.id() != closing.id()).map(|(_, t)| t - turn_start).collect();
        let max_other_accumulated = others_accumulated.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max_other_accumulated.is_finite() && (closing_accumulated - max_other_accumulated).abs() > f64::EPSILON {
            return Err(AuthoringError::TurnTimeViolation(
                closing.id().clone(),
                format!(
                    "closing send_message_to_user accumulated time {closing_accumulated:.3}s in turn {turn} must equal the max accumulated time of other turn events {max_other_accumulated:.3}s"
                ),
            ));
        }

        for (event, time) in &resolved {
            if event.id() == closing.id() {
                continue;
            }
            let accumulated = time - turn_start;
            if accumulated > closing_accumulated {
                return Err(AuthoringError::TurnTimeViolation(
                    event.id().clone(),
                    format!(
                        "accumulated time {accumulated:.3}s in turn {turn} exceeds the turn's closing send_message_to_user at {closing_accumulated:.3}s"
                    ),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "turn_tests.rs"]
mod tests;
