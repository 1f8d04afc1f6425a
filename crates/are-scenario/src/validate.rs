// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DAG invariants I1-I7, checked on every scenario mutation.

use are_core::{AuthoringError, Event, EventId, EventType};
use std::collections::{HashMap, HashSet};

use crate::graph::toposort;

/// `AgentUserInterface`'s turn-terminating tool. Duplicated (rather than
/// depended on) from `are-apps::demo`'s constant of the same name: the
/// protocol-level fact that this function name ends a turn does not
/// require depending on the demo app feature.
pub const SEND_MESSAGE_TO_USER: &str = "send_message_to_user";
pub const SEND_MESSAGE_TO_AGENT: &str = "send_message_to_agent";

fn action_function<'a>(event: &'a Event) -> Option<&'a str> {
    event.action().map(|a| a.function_name.as_str())
}

pub(crate) fn is_send_message_to_user(event: &Event) -> bool {
    matches!(event.event_type(), EventType::Agent) && action_function(event) == Some(SEND_MESSAGE_TO_USER)
}

fn is_send_message_to_agent(event: &Event) -> bool {
    matches!(event.event_type(), EventType::Agent) && action_function(event) == Some(SEND_MESSAGE_TO_AGENT)
}

/// Check invariants I1-I7 over the full event set. I1/I2 are local to a
/// single event and are also enforced at construction time by
/// `Event::depends_on`/`followed_by` (see are-core); this function is the
/// authoritative, whole-graph re-check run after every scenario mutation.
pub fn validate_dag(events: &[Event]) -> Result<(), AuthoringError> {
    let by_id: HashMap<&EventId, &Event> = events.iter().map(|e| (e.id(), e)).collect();

    for event in events {
        check_local_timing(event)?;
        check_dependencies_exist(event, &by_id)?;
    }

    // I3: the dependency graph is a DAG.
    toposort(events)?;

    // I4: every AGENT event has at least one dependency.
    for event in events {
        if event.requires_dependency() && event.dependencies().is_empty() {
            return Err(AuthoringError::AgentEventWithoutDependency(event.id().clone()));
        }
    }

    // I5: at most one conversation branch (USER/AGENT message exchange chain).
    check_single_conversation_branch(events)?;

    // I6/I7 need turn assignment and per-event dependency-type checks.
    let turn_idx = crate::turn::recompute_turn_idx(events)?;
    check_no_cross_turn_user_message_dependency(events, &by_id, &turn_idx)?;
    check_env_dependency_shape(events, &by_id)?;

    Ok(())
}

fn check_local_timing(event: &Event) -> Result<(), AuthoringError> {
    let meta = event.meta();
    if meta.event_time.is_some() && meta.event_relative_time.is_some() {
        return Err(AuthoringError::BothTimingFieldsSet(event.id().clone()));
    }
    if let Some(t) = meta.event_time {
        if t < 0.0 {
            return Err(AuthoringError::NegativeEventTime(event.id().clone()));
        }
    }
    if let Some(d) = meta.event_relative_time {
        if d < 0.0 {
            return Err(AuthoringError::NegativeRelativeTime(event.id().clone()));
        }
    }
    Ok(())
}

fn check_dependencies_exist(event: &Event, by_id: &HashMap<&EventId, &Event>) -> Result<(), AuthoringError> {
    for dep in event.dependencies() {
        if !by_id.contains_key(dep) {
            return Err(AuthoringError::UnknownDependency(event.id().clone(), dep.clone()));
        }
    }
    Ok(())
}

/// I5: treat every USER event and every `send_message_to_user`/
/// `send_message_to_agent` AGENT event as a "conversation marker". The
/// induced subgraph (restricted to edges between markers) must be weakly
/// connected: more than one component means two independent
/// conversations are interleaved in a single scenario, which is not
/// allowed.
fn check_single_conversation_branch(events: &[Event]) -> Result<(), AuthoringError> {
    let markers: Vec<&Event> = events
        .iter()
        .filter(|e| matches!(e.event_type(), EventType::User) || is_send_message_to_user(e) || is_send_message_to_agent(e))
        .collect();
    if markers.len() <= 1 {
        return Ok(());
    }

    let marker_ids: HashSet<&EventId> = markers.iter().map(|e| e.id()).collect();
    let mut parent: HashMap<&EventId, &EventId> = HashMap::new();
    fn find<'a>(parent: &mut HashMap<&'a EventId, &'a EventId>, id: &'a EventId) -> &'a EventId {
        let mut root = id;
        while let Some(&next) = parent.get(root) {
            if next == root {
                break;
            }
            root = next;
        }
        root
    }
    for id in &marker_ids {
        parent.insert(id, id);
    }
    for event in &markers {
        for dep in event.dependencies() {
            if marker_ids.contains(dep) {
                let root_a = find(&mut parent, event.id());
                let root_b = find(&mut parent, dep);
                if root_a != root_b {
                    parent.insert(root_a, root_b);
                }
            }
        }
    }

    let mut roots: HashSet<&EventId> = HashSet::new();
    for id in &marker_ids {
        roots.insert(find(&mut parent, id));
    }
    if roots.len() > 1 {
        let mut sorted: Vec<&&EventId> = roots.iter().collect();
        sorted.sort_by_key(|id| id.as_str());
        return Err(AuthoringError::MultipleConversationBranches((*sorted[0]).clone(), (*sorted[1]).clone()));
    }
    Ok(())
}

/// I6: no event may depend on a `send_message_to_user` output within the
/// same turn, except another `send_message_to_user`.
fn check_no_cross_turn_user_message_dependency(
    events: &[Event],
    by_id: &HashMap<&EventId, &Event>,
    turn_idx: &HashMap<EventId, usize>,
) -> Result<(), AuthoringError> {
    for event in events {
        if is_send_message_to_user(event) {
            continue;
        }
        for dep in event.dependencies() {
            let Some(dep_event) = by_id.get(dep) else { continue };
            if !is_send_message_to_user(dep_event) {
                continue;
            }
            if turn_idx.get(event.id()) == turn_idx.get(dep) {
                return Err(AuthoringError::DependsOnSameTurnUserMessage(event.id().clone()));
            }
        }
    }
    Ok(())
}

/// I7: an ENV event has exactly one dependency, of type USER, ENV, or a
/// `send_message_to_agent` AGENT event.
fn check_env_dependency_shape(events: &[Event], by_id: &HashMap<&EventId, &Event>) -> Result<(), AuthoringError> {
    for event in events {
        if !matches!(event.event_type(), EventType::Env) {
            continue;
        }
        if event.dependencies().len() != 1 {
            return Err(AuthoringError::InvalidEnvDependencyCount(event.id().clone(), event.dependencies().len()));
        }
        let dep_id = &event.dependencies()[0];
        let Some(dep_event) = by_id.get(dep_id) else {
            return Err(AuthoringError::UnknownDependency(event.id().clone(), dep_id.clone()));
        };
        let valid = matches!(dep_event.event_type(), EventType::User | EventType::Env) || is_send_message_to_agent(dep_event);
        if !valid {
            return Err(AuthoringError::InvalidEnvDependencyCount(event.id().clone(), 1));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
