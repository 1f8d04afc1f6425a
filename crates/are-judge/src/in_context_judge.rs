// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The in-context judge: a baseline that puts the whole agent and oracle
//! trace into a single model prompt and asks it for a verdict, rather
//! than matching events structurally.

use are_core::{CompletedEvent, CompletedOracleEvent};

use crate::soft::JudgeError;

/// One bullet line describing a tool call, for the judge prompt. Mirrors
/// `BulletEventDescription` — a tool name plus the subset of its
/// arguments worth showing the judge (full argument dumps are noisy and
/// rarely change the verdict).
#[derive(Debug, Clone)]
pub struct BulletEventDescription {
    pub tool_name: String,
    pub selected_args: Vec<String>,
}

impl BulletEventDescription {
    pub fn new(tool_name: impl Into<String>, selected_args: Vec<String>) -> Self {
        Self { tool_name: tool_name.into(), selected_args }
    }

    pub fn describe(&self, event: &CompletedEvent) -> String {
        let Some(action) = &event.action else {
            return format!("- {}", self.tool_name);
        };
        if self.selected_args.is_empty() {
            return format!("- {}", self.tool_name);
        }
        let args: Vec<String> = self
            .selected_args
            .iter()
            .filter_map(|name| action.args.get(name).map(|v| format!("{name}={v}")))
            .collect();
        format!("- {} ({})", self.tool_name, args.join(", "))
    }
}

/// A chat completion engine the in-context judge can call. `are-judge`
/// ships no concrete implementation — wiring a real model is the
/// embedding application's job.
pub trait JudgeEngine: Send + Sync {
    fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<Option<String>, JudgeError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullJudgeEngine;

impl JudgeEngine for NullJudgeEngine {
    fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Result<Option<String>, JudgeError> {
        Err(JudgeError::NoEngineConfigured)
    }
}

/// Builds a single prompt describing one turn's agent trace and oracle
/// trace, and asks the configured engine to judge the turn.
pub struct InContextJudge {
    pub engine: std::sync::Arc<dyn JudgeEngine>,
    pub system_prompt: String,
    pub tool_descriptions: std::collections::HashMap<String, BulletEventDescription>,
}

impl InContextJudge {
    pub fn new(engine: std::sync::Arc<dyn JudgeEngine>, system_prompt: impl Into<String>) -> Self {
        Self { engine, system_prompt: system_prompt.into(), tool_descriptions: std::collections::HashMap::new() }
    }

    pub fn with_tool_description(mut self, tool_name: impl Into<String>, description: BulletEventDescription) -> Self {
        self.tool_descriptions.insert(tool_name.into(), description);
        self
    }

    fn describe_event(&self, event: &CompletedEvent) -> String {
        let tool_name = event.action.as_ref().map(|a| format!("{}__{}", a.app_name, a.function_name)).unwrap_or_default();
        match self.tool_descriptions.get(&tool_name) {
            Some(desc) => desc.describe(event),
            None => format!("- {tool_name}"),
        }
    }

    fn build_user_prompt(&self, agent_events: &[CompletedEvent], oracle_events: &[CompletedOracleEvent]) -> String {
        let agent_list = agent_events.iter().map(|e| self.describe_event(e)).collect::<Vec<_>>().join("\n");
        let oracle_list = oracle_events
            .iter()
            .filter_map(|o| o.oracle.event.action().map(|a| format!("- {}__{}", a.app_name, a.function_name)))
            .collect::<Vec<_>>()
            .join("\n");
        format!("Agent trace:\n{agent_list}\n\nExpected (oracle) trace:\n{oracle_list}\n\nDid the agent accomplish the expected trace? Answer with [[success]] or [[failure]].")
    }

    /// Runs one turn's judgment: builds the prompt, calls the engine,
    /// and parses its verdict. `Ok(None)` means the engine gave no
    /// parseable verdict — neither `[[success]]` nor `[[failure]]`
    /// appears in the response.
    pub fn judge_turn(&self, agent_events: &[CompletedEvent], oracle_events: &[CompletedOracleEvent]) -> Result<Option<bool>, JudgeError> {
        let user_prompt = self.build_user_prompt(agent_events, oracle_events);
        let Some(response) = self.engine.complete(&self.system_prompt, &user_prompt)? else {
            return Ok(None);
        };
        if response.contains("[[success]]") {
            Ok(Some(true))
        } else if response.contains("[[failure]]") {
            Ok(Some(false))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "in_context_judge_tests.rs"]
mod tests;
