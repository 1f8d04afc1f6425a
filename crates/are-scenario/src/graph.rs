// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kahn's-algorithm topological sort over an event DAG, shared by the
//! invariant validator (I3: cycle detection) and turn computation (turns
//! are assigned in causal order).

use std::collections::{HashMap, VecDeque};

use are_core::{AuthoringError, Event, EventId};

/// Topologically sort `events` by their `dependencies` edges. Ties
/// (independent events) break by declaration order, so the result is
/// deterministic given the same input order — needed for turn
/// assignment to be stable run over run.
pub fn toposort(events: &[Event]) -> Result<Vec<EventId>, AuthoringError> {
    let index_of: HashMap<&EventId, usize> =
        events.iter().enumerate().map(|(i, e)| (e.id(), i)).collect();

    let mut in_degree: HashMap<EventId, usize> = HashMap::new();
    for event in events {
        in_degree.entry(event.id().clone()).or_insert(0);
        for dep in event.dependencies() {
            if index_of.contains_key(dep) {
                *in_degree.entry(event.id().clone()).or_insert(0) += 1;
            }
        }
    }

    // Seed the frontier with zero-in-degree events, in declaration order.
    let mut queue: VecDeque<EventId> = events
        .iter()
        .filter(|e| in_degree.get(e.id()).copied().unwrap_or(0) == 0)
        .map(|e| e.id().clone())
        .collect();

    let mut successors_of: HashMap<&EventId, Vec<&EventId>> = HashMap::new();
    for event in events {
        for dep in event.dependencies() {
            successors_of.entry(dep).or_default().push(event.id());
        }
    }

    let mut order = Vec::with_capacity(events.len());
    while let Some(id) = queue.pop_front() {
        order.push(id.clone());
        if let Some(successors) = successors_of.get(&id) {
            // Deterministic: visit successors in declaration order.
            let mut successors: Vec<&EventId> = successors.to_vec();
            successors.sort_by_key(|s| index_of.get(s).copied().unwrap_or(usize::MAX));
            for succ in successors {
                let Some(degree) = in_degree.get_mut(succ) else {
                    continue;
                };
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(succ.clone());
                }
            }
        }
    }

    if order.len() != events.len() {
        let stuck = events
            .iter()
            .find(|e| !order.contains(e.id()))
            .map(|e| e.id().clone())
            .unwrap_or_else(EventId::new);
        return Err(AuthoringError::CyclicDependency(stuck));
    }

    Ok(order)
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
