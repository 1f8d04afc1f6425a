// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The graph-per-event judge: replays an agent's completed-event log
//! against a scenario's oracle trace, matching each oracle event to one
//! agent event in order.
//!
//! Oracle events must arrive already in a topologically valid order
//! (every event after all of its dependencies) — the scenario author's
//! `OracleEvent` list, not a graph this crate re-sorts. `are-scenario`'s
//! builder guarantees this for any trace it produces.
//!
//! Both the tool-call-count check and the per-event matching pass are
//! scoped to one turn at a time: an oracle event in turn N only ever
//! competes against agent-log entries from turn N. A stray extra call in
//! an earlier turn can't borrow against a later turn's oracle budget, and
//! a causally-earlier match from a previous turn still satisfies a later
//! turn's dependency check.

use std::collections::{BTreeMap, HashMap, HashSet};

use are_core::{
    resolve_placeholders, CompletedEvent, CompletedOracleEvent, Event, EventId, EventType, OperationType, OracleEvent,
};
use are_scenario::{recompute_turn_idx, TurnIdx};
use serde_json::Value;

use crate::event_judge::{AgentEventJudge, EnvUserEventJudge};
use crate::judgment::{
    EnvOracleMatchingFailure, EventComparisonFailure, EventComparisonFailureType, JudgeFailure,
    Judgment, OracleEventMatchingFailure, ToolCallCountsFailure,
};
use crate::soft::{JudgeError, SoftCheckContext};

const SEND_MESSAGE_TO_USER_SUFFIX: &str = "__send_message_to_user";

fn tool_name_for_event(event: &Event) -> Option<String> {
    event.action().map(|a| format!("{}__{}", a.app_name, a.function_name))
}

fn tool_name_for_completed(event: &CompletedEvent) -> Option<String> {
    event.action.as_ref().map(|a| format!("{}__{}", a.app_name, a.function_name))
}

/// Clone `oracle`, resolving any `{{event_id}}` placeholder in its
/// action's args against `return_values` (already-matched oracle ids ->
/// the corresponding agent event's return value). Events with no action
/// (CONDITION/VALIDATION/STOP) pass through unchanged.
fn oracle_with_resolved_placeholders(oracle: &OracleEvent, return_values: &HashMap<EventId, Value>) -> OracleEvent {
    let mut event = (*oracle.event).clone();
    match &mut event {
        Event::User(action_event) | Event::Env(action_event) | Event::Agent(action_event) => {
            if let Some(action) = &mut action_event.action {
                action.args = resolve_placeholders(&action.args, return_values);
            }
        }
        Event::Condition(_) | Event::Validation(_) | Event::Stop(_) => {}
    }
    OracleEvent { event: Box::new(event), event_time_comparator: oracle.event_time_comparator, absolute_event_time: oracle.absolute_event_time }
}

/// An agent-log entry counts toward judging only if it succeeded and, for
/// tool calls, only if it mutated app state: a failed call never happened
/// as far as the oracle is concerned, and extra read-only calls (e.g. the
/// agent double-checking a calendar before booking) are tolerated noise
/// rather than something the oracle trace needs to account for.
fn is_judgeable(event: &CompletedEvent) -> bool {
    if !event.is_success() {
        return false;
    }
    match event.action.as_ref() {
        Some(action) => action.operation_type == OperationType::Write,
        None => true,
    }
}

fn is_send_message_to_user_completed(event: &CompletedEvent) -> bool {
    matches!(event.action.as_ref(), Some(action) if action.function_name == are_scenario::validate::SEND_MESSAGE_TO_USER)
}

/// Group oracle events by turn, preserving each turn's original (already
/// topologically valid) order.
fn oracle_turns(oracle_events: &[OracleEvent]) -> Result<BTreeMap<TurnIdx, Vec<&OracleEvent>>, JudgeError> {
    let events: Vec<Event> = oracle_events.iter().map(|o| (*o.event).clone()).collect();
    let turn_idx = recompute_turn_idx(&events).map_err(|err| JudgeError::CyclicOracleGraph(err.to_string()))?;

    let mut by_turn: BTreeMap<TurnIdx, Vec<&OracleEvent>> = BTreeMap::new();
    for oracle in oracle_events {
        let turn = turn_idx.get(oracle.id()).copied().unwrap_or(0);
        by_turn.entry(turn).or_default().push(oracle);
    }
    Ok(by_turn)
}

/// Group agent-log indices by turn: a turn ends right after the
/// `send_message_to_user` call that closes it, mirroring how oracle turns
/// are assigned over the scenario DAG.
fn agent_turns(agent_log: &[CompletedEvent]) -> BTreeMap<TurnIdx, Vec<usize>> {
    let mut by_turn: BTreeMap<TurnIdx, Vec<usize>> = BTreeMap::new();
    let mut current: TurnIdx = 0;
    for (index, event) in agent_log.iter().enumerate() {
        by_turn.entry(current).or_default().push(index);
        if is_send_message_to_user_completed(event) {
            current += 1;
        }
    }
    by_turn
}

/// Counts every tool call in a trace, splitting out
/// `send_message_to_user` calls into their own tally — the original
/// implementation zeroes that key out of the multiset comparison and
/// checks it separately, with slack for extra clarifying messages.
fn tally(names: impl Iterator<Item = Option<String>>) -> (HashMap<String, usize>, usize) {
    let mut calls = HashMap::new();
    let mut send_message_to_user_count = 0usize;
    for name in names.flatten() {
        if name.ends_with(SEND_MESSAGE_TO_USER_SUFFIX) {
            send_message_to_user_count += 1;
        } else {
            *calls.entry(name).or_insert(0) += 1;
        }
    }
    (calls, send_message_to_user_count)
}

/// Matches a graph-per-event judge against one scenario run.
pub struct GraphPerEventJudge {
    pub env_user_judge: EnvUserEventJudge,
    pub agent_judge: AgentEventJudge,
    pub extra_send_message_to_user_allowed: usize,
}

impl GraphPerEventJudge {
    pub fn new(agent_judge: AgentEventJudge) -> Self {
        Self { env_user_judge: EnvUserEventJudge, agent_judge, extra_send_message_to_user_allowed: 0 }
    }

    pub fn with_extra_send_message_to_user_allowed(mut self, n: usize) -> Self {
        self.extra_send_message_to_user_allowed = n;
        self
    }

    /// Tool-call multiset check for one turn, run before any per-event
    /// matching in that turn: if the agent's call shape for this turn
    /// already diverges from the oracle's, there is no point attempting
    /// to line up individual events within it.
    fn preliminary_checks(
        &self,
        turn: TurnIdx,
        agent_log: &[CompletedEvent],
        agent_indices: &[usize],
        oracle_events: &[&OracleEvent],
    ) -> Result<(), ToolCallCountsFailure> {
        let (agent_calls, agent_send_message_to_user_count) =
            tally(agent_indices.iter().map(|&i| tool_name_for_completed(&agent_log[i])));
        let (oracle_calls, oracle_send_message_to_user_count) =
            tally(oracle_events.iter().map(|o| tool_name_for_event(&o.event)));

        let counts_match = agent_calls == oracle_calls;
        let aui_in_range = agent_send_message_to_user_count >= oracle_send_message_to_user_count
            && agent_send_message_to_user_count <= oracle_send_message_to_user_count + self.extra_send_message_to_user_allowed;

        if counts_match && aui_in_range {
            Ok(())
        } else {
            Err(ToolCallCountsFailure {
                turn,
                agent_calls,
                agent_send_message_to_user_count,
                oracle_calls,
                oracle_send_message_to_user_count,
                extra_send_message_to_user_allowed: self.extra_send_message_to_user_allowed,
            })
        }
    }

    fn match_env_oracle_event(
        &self,
        oracle: &OracleEvent,
        agent_log: &[CompletedEvent],
        candidate_indices: &[usize],
        matched: &HashSet<EventId>,
    ) -> Result<EventId, JudgeFailure> {
        for &index in candidate_indices {
            let event = &agent_log[index];
            if matched.contains(&event.event_id) {
                continue;
            }
            let completed_oracle = CompletedOracleEvent::unmatched(oracle.clone());
            if self.env_user_judge.compare(event, &completed_oracle) {
                return Ok(event.event_id.clone());
            }
        }
        Err(JudgeFailure::EnvOracleMatching(EnvOracleMatchingFailure { oracle_event_id: oracle.id().clone() }))
    }

    /// `Ok(Ok(id))` is a match; `Ok(Err(failure))` is an ordinary no-match
    /// (every agent event was tried and rejected); `Err(_)` is a real
    /// judge misconfiguration (e.g. an oracle tool with no registered
    /// tool judge) that should abort the run rather than report a
    /// judgment.
    #[allow(clippy::too_many_arguments)]
    fn match_agent_oracle_event(
        &self,
        oracle: &OracleEvent,
        agent_log: &[CompletedEvent],
        candidate_indices: &[usize],
        matched: &HashSet<EventId>,
        oracle_to_agent: &HashMap<EventId, EventId>,
        oracle_time_of: &HashMap<EventId, f64>,
        agent_index_of: &HashMap<EventId, usize>,
        ctx: &SoftCheckContext,
    ) -> Result<Result<EventId, OracleEventMatchingFailure>, JudgeError> {
        let oracle_tool = tool_name_for_event(&oracle.event).unwrap_or_default();

        let mut max_parent_oracle_time = 0.0f64;
        let mut max_parent_agent_time = 0.0f64;
        let mut max_parent_agent_index: Option<usize> = None;
        for parent_id in oracle.event.dependencies() {
            if let Some(&parent_oracle_time) = oracle_time_of.get(parent_id) {
                max_parent_oracle_time = max_parent_oracle_time.max(parent_oracle_time);
            }
            if let Some(parent_agent_id) = oracle_to_agent.get(parent_id) {
                if let Some(&idx) = agent_index_of.get(parent_agent_id) {
                    max_parent_agent_index = Some(max_parent_agent_index.map_or(idx, |m: usize| m.max(idx)));
                    max_parent_agent_time = max_parent_agent_time.max(agent_log[idx].metadata.completion_time);
                }
            }
        }

        // Resolve `{{event_id}}` placeholders in the oracle's args against
        // the return values of oracle events already matched in this run,
        // keyed by the *oracle* id the placeholder names (not the agent
        // event's own id, which may differ).
        let return_values: HashMap<EventId, Value> = oracle_to_agent
            .iter()
            .filter_map(|(oracle_id, agent_id)| {
                let &idx = agent_index_of.get(agent_id)?;
                let value = agent_log[idx].metadata.return_value.clone()?;
                Some((oracle_id.clone(), value))
            })
            .collect();
        let resolved_oracle = oracle_with_resolved_placeholders(oracle, &return_values);
        let completed_oracle = CompletedOracleEvent::unmatched(resolved_oracle);

        let mut comparison_failures = Vec::new();
        for &index in candidate_indices {
            let event = &agent_log[index];
            if matched.contains(&event.event_id) {
                comparison_failures.push(EventComparisonFailure {
                    oracle_tool_name: oracle_tool.clone(),
                    oracle_event_id: oracle.id().clone(),
                    agent_tool_name: tool_name_for_completed(event).unwrap_or_default(),
                    agent_event_id: event.event_id.clone(),
                    failure_type: EventComparisonFailureType::AlreadyMatched,
                });
                continue;
            }
            if let Some(parent_index) = max_parent_agent_index {
                if index <= parent_index {
                    comparison_failures.push(EventComparisonFailure {
                        oracle_tool_name: oracle_tool.clone(),
                        oracle_event_id: oracle.id().clone(),
                        agent_tool_name: tool_name_for_completed(event).unwrap_or_default(),
                        agent_event_id: event.event_id.clone(),
                        failure_type: EventComparisonFailureType::Causality,
                    });
                    continue;
                }
            }
            if tool_name_for_completed(event).as_deref() != Some(oracle_tool.as_str()) {
                comparison_failures.push(EventComparisonFailure {
                    oracle_tool_name: oracle_tool.clone(),
                    oracle_event_id: oracle.id().clone(),
                    agent_tool_name: tool_name_for_completed(event).unwrap_or_default(),
                    agent_event_id: event.event_id.clone(),
                    failure_type: EventComparisonFailureType::ToolJudgeReject,
                });
                continue;
            }
            let matches = self.agent_judge.compare(event, &completed_oracle, max_parent_oracle_time, max_parent_agent_time, ctx)?;
            if matches {
                return Ok(Ok(event.event_id.clone()));
            }
            comparison_failures.push(EventComparisonFailure {
                oracle_tool_name: oracle_tool.clone(),
                oracle_event_id: oracle.id().clone(),
                agent_tool_name: tool_name_for_completed(event).unwrap_or_default(),
                agent_event_id: event.event_id.clone(),
                failure_type: EventComparisonFailureType::ToolJudgeReject,
            });
        }
        Ok(Err(OracleEventMatchingFailure { oracle_tool_name: oracle_tool, comparison_failures }))
    }

    pub fn judge(&self, agent_log: &[CompletedEvent], oracle_events: &[OracleEvent], ctx: &SoftCheckContext) -> Result<Judgment, JudgeError> {
        let agent_log: Vec<CompletedEvent> = agent_log.iter().filter(|e| is_judgeable(e)).cloned().collect();
        let agent_log = agent_log.as_slice();

        let oracle_by_turn = oracle_turns(oracle_events)?;
        let agent_by_turn = agent_turns(agent_log);
        let last_turn = oracle_by_turn.keys().copied().chain(agent_by_turn.keys().copied()).max().unwrap_or(0);

        let agent_index_of: HashMap<EventId, usize> = agent_log.iter().enumerate().map(|(i, e)| (e.event_id.clone(), i)).collect();
        let oracle_time_of: HashMap<EventId, f64> =
            oracle_events.iter().filter_map(|o| o.event.event_time().map(|t| (o.id().clone(), t))).collect();
        let mut matched: HashSet<EventId> = HashSet::new();
        let mut oracle_to_agent: HashMap<EventId, EventId> = HashMap::new();
        let mut agent_to_oracle: HashMap<EventId, EventId> = HashMap::new();

        let no_oracle: Vec<&OracleEvent> = Vec::new();
        let no_agent: Vec<usize> = Vec::new();

        for turn in 0..=last_turn {
            let turn_oracle = oracle_by_turn.get(&turn).unwrap_or(&no_oracle);
            let turn_agent_indices = agent_by_turn.get(&turn).unwrap_or(&no_agent);

            if let Err(failure) = self.preliminary_checks(turn, agent_log, turn_agent_indices, turn_oracle) {
                return Ok(Judgment::failure(JudgeFailure::ToolCallCounts(failure)));
            }

            for &oracle in turn_oracle {
                let agent_id = match oracle.event.event_type() {
                    EventType::Agent => match self.match_agent_oracle_event(
                        oracle,
                        agent_log,
                        turn_agent_indices,
                        &matched,
                        &oracle_to_agent,
                        &oracle_time_of,
                        &agent_index_of,
                        ctx,
                    )? {
                        Ok(id) => id,
                        Err(failure) => return Ok(Judgment::failure(JudgeFailure::OracleEventMatching(failure))),
                    },
                    _ => match self.match_env_oracle_event(oracle, agent_log, turn_agent_indices, &matched) {
                        Ok(id) => id,
                        Err(failure) => return Ok(Judgment::failure(failure)),
                    },
                };
                matched.insert(agent_id.clone());
                oracle_to_agent.insert(oracle.id().clone(), agent_id.clone());
                agent_to_oracle.insert(agent_id, oracle.id().clone());
            }
        }

        Ok(Judgment { success: true, failure: None, agent_to_oracle })
    }
}

#[cfg(test)]
#[path = "graph_judge_tests.rs"]
mod tests;
