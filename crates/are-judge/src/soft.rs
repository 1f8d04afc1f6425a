// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pluggable LLM-backed collaborators. Concrete prompt templates and
//! engine wiring are out of scope for this crate (an agent-evaluation
//! engine's business, not the judge's); `are-judge` ships only the
//! traits and a null implementation of each so `MildToolJudge` and
//! `InContextJudge` degrade gracefully with no engine configured.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JudgeError {
    #[error("no judge engine configured")]
    NoEngineConfigured,

    #[error("tool {0:?} has no registered tool judge")]
    UnknownTool(String),

    #[error("dependency cycle detected among oracle events, starting at {0}")]
    CyclicOracleGraph(String),
}

/// Extra context a soft checker may need beyond the two argument values:
/// the day the event ran on, the user's own name/address (to phrase
/// tolerant comparisons), and the subtask text extracted for this turn.
#[derive(Debug, Clone, Default)]
pub struct SoftCheckContext {
    pub today_date: String,
    pub user_name: String,
    pub user_address: String,
    pub subtask: String,
}

/// An LLM-backed argument comparison. `Ok(None)` means "no opinion" (the
/// checker cannot decide without a real engine) and is treated as a pass
/// by `MildToolJudge`, matching the original's behavior of skipping soft
/// checks whose collaborator is unavailable rather than failing closed.
pub trait SoftChecker: Send + Sync {
    fn check(&self, agent_args: &Value, oracle_args: &Value, ctx: &SoftCheckContext) -> Result<Option<bool>, JudgeError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSoftChecker;

impl SoftChecker for NullSoftChecker {
    fn check(&self, _agent_args: &Value, _oracle_args: &Value, _ctx: &SoftCheckContext) -> Result<Option<bool>, JudgeError> {
        Ok(None)
    }
}

/// Extracts the slice of the overall task text relevant to one tool call,
/// used to scope soft-checker prompts to the step being judged.
pub trait SubtaskExtractor: Send + Sync {
    fn extract(&self, turn_task: &str, tool_name: &str) -> Result<String, JudgeError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSubtaskExtractor;

impl SubtaskExtractor for NullSubtaskExtractor {
    fn extract(&self, _turn_task: &str, _tool_name: &str) -> Result<String, JudgeError> {
        Ok(String::new())
    }
}

#[cfg(test)]
#[path = "soft_tests.rs"]
mod tests;
