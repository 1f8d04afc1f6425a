// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The judge's verdict types: per-event outcomes rolled up into a
//! pass/fail judgment for a whole run.

use std::collections::HashMap;

use are_core::EventId;
use serde::{Deserialize, Serialize};

/// Why one oracle event's attempted match against an agent event failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventComparisonFailureType {
    ToolJudgeReject,
    AlreadyMatched,
    Causality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventComparisonFailure {
    pub oracle_tool_name: String,
    pub oracle_event_id: EventId,
    pub agent_tool_name: String,
    pub agent_event_id: EventId,
    pub failure_type: EventComparisonFailureType,
}

/// The agent's tool-call multiset diverged from the oracle's within one
/// turn, before any per-event matching was attempted in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallCountsFailure {
    pub turn: usize,
    pub agent_calls: HashMap<String, usize>,
    pub agent_send_message_to_user_count: usize,
    pub oracle_calls: HashMap<String, usize>,
    pub oracle_send_message_to_user_count: usize,
    pub extra_send_message_to_user_allowed: usize,
}

/// An ENV/USER oracle event found no agent event with the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvOracleMatchingFailure {
    pub oracle_event_id: EventId,
}

/// An AGENT oracle event found no unmatched, causally-valid, tool-judge
/// -accepted agent event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleEventMatchingFailure {
    pub oracle_tool_name: String,
    pub comparison_failures: Vec<EventComparisonFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JudgeFailure {
    ToolCallCounts(ToolCallCountsFailure),
    EnvOracleMatching(EnvOracleMatchingFailure),
    OracleEventMatching(OracleEventMatchingFailure),
}

/// The judge's verdict: whether the agent's trace is accepted, why not if
/// it wasn't, and the full agent-event-id -> oracle-event-id mapping
/// discovered along the way (useful for diagnostics even on failure).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Judgment {
    pub success: bool,
    pub failure: Option<JudgeFailure>,
    pub agent_to_oracle: HashMap<EventId, EventId>,
}

impl Judgment {
    pub fn success() -> Self {
        Self { success: true, failure: None, agent_to_oracle: HashMap::new() }
    }

    pub fn failure(failure: JudgeFailure) -> Self {
        Self { success: false, failure: Some(failure), agent_to_oracle: HashMap::new() }
    }
}

#[cfg(test)]
#[path = "judgment_tests.rs"]
mod tests;
