// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event judges: compare one pair of (agent, oracle) events of a single
//! type — `EnvUserEventJudge` for USER/ENV events, `AgentEventJudge` for
//! AGENT events.

use std::collections::HashMap;

use are_core::{CompletedEvent, CompletedOracleEvent, EventTimeComparator};

use crate::soft::{JudgeError, SoftCheckContext};
use crate::tool_judge::MildToolJudge;

/// The qualified tool name a `CompletedEvent`'s action resolves to, in
/// the `AppName__function_name` form the original trace format uses —
/// needed to key the per-tool judge map and for tool-call-count checks.
pub fn tool_name(event: &CompletedEvent) -> Option<String> {
    event.action.as_ref().map(|a| format!("{}__{}", a.app_name, a.function_name))
}

/// Compares ENV/USER events: a match requires only that the event ids
/// agree, since neither carries an oracle-comparable argument surface of
/// its own (the data it caused is checked via its downstream effects).
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvUserEventJudge;

impl EnvUserEventJudge {
    pub fn compare(&self, agent_event: &CompletedEvent, oracle_event: &CompletedOracleEvent) -> bool {
        agent_event.event_id == *oracle_event.oracle.id()
    }
}

/// Tolerances for [`AgentEventJudge::event_time_checker`], defaulting to
/// `pre=10s, post=25s, threshold=1s` (see DESIGN.md for how these were
/// chosen).
#[derive(Debug, Clone, Copy)]
pub struct EventTimeConfig {
    pub pre_event_tolerance_seconds: f64,
    pub post_event_tolerance_seconds: f64,
    pub check_time_threshold_seconds: f64,
}

impl Default for EventTimeConfig {
    fn default() -> Self {
        Self { pre_event_tolerance_seconds: 10.0, post_event_tolerance_seconds: 25.0, check_time_threshold_seconds: 1.0 }
    }
}

/// Compares AGENT events: first their timing, then delegates argument
/// comparison to the tool judge registered for the oracle's tool name.
pub struct AgentEventJudge {
    pub time_config: EventTimeConfig,
    pub tool_judges: HashMap<String, MildToolJudge>,
}

impl AgentEventJudge {
    pub fn new(time_config: EventTimeConfig, tool_judges: HashMap<String, MildToolJudge>) -> Self {
        Self { time_config, tool_judges }
    }

    /// Is `agent_event_time` within tolerance of `oracle_event_time`,
    /// under the given comparator (default `Equal`)?
    pub fn event_time_checker(&self, agent_event_time: f64, oracle_event_time: f64, comparator: Option<EventTimeComparator>) -> bool {
        let pre = self.time_config.pre_event_tolerance_seconds;
        let post = self.time_config.post_event_tolerance_seconds;
        match comparator.unwrap_or(EventTimeComparator::Equal) {
            EventTimeComparator::Equal => agent_event_time <= oracle_event_time + post && agent_event_time >= oracle_event_time - pre,
            EventTimeComparator::LessThan => agent_event_time <= oracle_event_time + post,
            EventTimeComparator::GreaterThan => agent_event_time >= oracle_event_time - pre,
        }
    }

    /// Checks timing against either an absolute deadline (if the oracle
    /// event carries one) or a turn-relative delay measured from each
    /// trace's own latest-matched parent event, skipping the check
    /// entirely when the oracle's relative delay is below
    /// `check_time_threshold_seconds` and no explicit comparator was set
    /// (an "instant" step whose exact timing is not meaningful).
    pub fn check_time(
        &self,
        agent_event_time: f64,
        oracle_event: &CompletedOracleEvent,
        max_parent_oracle_event_time: f64,
        max_parent_agent_event_time: f64,
    ) -> bool {
        let comparator = oracle_event.oracle.event_time_comparator;
        if let Some(absolute) = oracle_event.oracle.absolute_event_time {
            return self.event_time_checker(agent_event_time, absolute, comparator);
        }
        let Some(oracle_event_time) = oracle_event.oracle.expected_time() else {
            return true;
        };
        let agent_relative = agent_event_time - max_parent_agent_event_time;
        let oracle_relative = oracle_event_time - max_parent_oracle_event_time;
        if oracle_relative > self.time_config.check_time_threshold_seconds || comparator.is_some() {
            return self.event_time_checker(agent_relative, oracle_relative, comparator);
        }
        true
    }

    pub fn compare(
        &self,
        agent_event: &CompletedEvent,
        oracle_event: &CompletedOracleEvent,
        max_parent_oracle_event_time: f64,
        max_parent_agent_event_time: f64,
        ctx: &SoftCheckContext,
    ) -> Result<bool, JudgeError> {
        if !self.check_time(agent_event.metadata.completion_time, oracle_event, max_parent_oracle_event_time, max_parent_agent_event_time) {
            return Ok(false);
        }
        let Some(oracle_tool) = tool_name_of_oracle(oracle_event) else {
            return Ok(agent_event.action.is_none());
        };
        let Some(judge) = self.tool_judges.get(&oracle_tool) else {
            return Err(JudgeError::UnknownTool(oracle_tool));
        };
        let (Some(agent_action), Some(oracle_action)) = (&agent_event.action, oracle_event.oracle.event.action()) else {
            return Ok(agent_event.action.is_none() && oracle_event.oracle.event.action().is_none());
        };
        judge.compare(agent_action, oracle_action, ctx)
    }
}

fn tool_name_of_oracle(oracle_event: &CompletedOracleEvent) -> Option<String> {
    oracle_event.oracle.event.action().map(|a| format!("{}__{}", a.app_name, a.function_name))
}

#[cfg(test)]
#[path = "event_judge_tests.rs"]
mod tests;
