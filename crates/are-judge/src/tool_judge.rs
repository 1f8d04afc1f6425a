// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool judges: compare one agent tool call against the oracle's
//! expected call for the same step, using either hard (scripted) or
//! soft (LLM-backed) checkers, or a blend of both.

use std::collections::HashMap;
use std::sync::Arc;

use are_core::Action;
use indexmap::IndexMap;
use serde_json::Value;

use crate::checkers::{self, CheckerType};
use crate::soft::{JudgeError, NullSoftChecker, SoftCheckContext, SoftChecker};

fn run_checker(checker: CheckerType, agent: &Value, oracle: &Value, tolerance_list: &[String]) -> bool {
    match checker {
        CheckerType::Eq => checkers::eq_checker(agent, oracle),
        CheckerType::UnorderedList => checkers::unordered_list_checker(agent, oracle),
        CheckerType::ListAttendees => checkers::list_attendees_checker(agent, oracle, tolerance_list),
        CheckerType::Datetime => checkers::datetime_checker(agent, oracle),
        CheckerType::PhoneNumber => checkers::phone_number_checker(agent, oracle),
        CheckerType::EqStrStrip => checkers::eq_str_strip_checker(agent, oracle),
        CheckerType::Path => checkers::path_checker(agent, oracle),
        CheckerType::UnorderedPathList => checkers::unordered_path_list_checker(agent, oracle),
        CheckerType::ContainAny => {
            let targets = oracle.as_array().map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_string)).collect()).unwrap_or_default();
            checkers::contain_any_checker(agent, &targets)
        }
        CheckerType::ContainAll => {
            let targets = oracle.as_array().map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_string)).collect()).unwrap_or_default();
            checkers::contain_all_checker(agent, &targets)
        }
    }
}

/// Which checker runs against each named argument of one tool.
#[derive(Debug, Clone, Default)]
pub struct ArgCheckerConfig {
    pub arg_to_checker: HashMap<String, CheckerType>,
    pub tolerance_list: Vec<String>,
}

impl ArgCheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_checker(mut self, arg: impl Into<String>, checker: CheckerType) -> Self {
        self.arg_to_checker.insert(arg.into(), checker);
        self
    }
}

fn args_value(args: &IndexMap<String, Value>) -> HashMap<String, Value> {
    args.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

/// Runs every hard checker configured for a tool's arguments. All must
/// pass for the call to match.
#[derive(Debug, Clone)]
pub struct HardToolJudge {
    pub config: ArgCheckerConfig,
}

impl HardToolJudge {
    pub fn new(config: ArgCheckerConfig) -> Self {
        Self { config }
    }

    pub fn compare(&self, agent_action: &Action, oracle_action: &Action) -> bool {
        let agent_args = args_value(&agent_action.args);
        let oracle_args = args_value(&oracle_action.args);
        for (arg_name, checker) in &self.config.arg_to_checker {
            let agent_value = agent_args.get(arg_name).cloned().unwrap_or(Value::Null);
            let oracle_value = oracle_args.get(arg_name).cloned().unwrap_or(Value::Null);
            if !run_checker(*checker, &agent_value, &oracle_value, &self.config.tolerance_list) {
                return false;
            }
        }
        true
    }
}

/// Runs a configured [`SoftChecker`] over every argument not already
/// covered by a hard checker, once the hard pass succeeds. `Ok(None)`
/// from the collaborator is treated as a pass (see `soft::SoftChecker`).
pub struct SoftToolJudge {
    pub checker: Arc<dyn SoftChecker>,
    pub soft_args: Vec<String>,
}

impl SoftToolJudge {
    pub fn new(checker: Arc<dyn SoftChecker>, soft_args: Vec<String>) -> Self {
        Self { checker, soft_args }
    }

    pub fn compare(&self, agent_action: &Action, oracle_action: &Action, ctx: &SoftCheckContext) -> Result<bool, JudgeError> {
        if self.soft_args.is_empty() {
            return Ok(true);
        }
        let agent_args = args_value(&agent_action.args);
        let oracle_args = args_value(&oracle_action.args);
        // Fast path: if the selected args are already byte-equal, no need
        // to consult the (expensive, possibly-absent) soft collaborator.
        let already_equal = self.soft_args.iter().all(|arg| agent_args.get(arg) == oracle_args.get(arg));
        if already_equal {
            return Ok(true);
        }
        for arg in &self.soft_args {
            let agent_value = agent_args.get(arg).cloned().unwrap_or(Value::Null);
            let oracle_value = oracle_args.get(arg).cloned().unwrap_or(Value::Null);
            if self.checker.check(&agent_value, &oracle_value, ctx)? == Some(false) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Runs the hard judge first; if it passes, the soft judge runs too —
/// unless `event_id_to_checker_params` scripted mode is in effect, in
/// which case the soft judge is skipped entirely.
pub struct MildToolJudge {
    pub hard: HardToolJudge,
    pub soft: Option<SoftToolJudge>,
}

impl MildToolJudge {
    pub fn new(hard: HardToolJudge, soft: Option<SoftToolJudge>) -> Self {
        Self { hard, soft }
    }

    pub fn hard_only(config: ArgCheckerConfig) -> Self {
        Self { hard: HardToolJudge::new(config), soft: None }
    }

    pub fn compare(&self, agent_action: &Action, oracle_action: &Action, ctx: &SoftCheckContext) -> Result<bool, JudgeError> {
        if !self.hard.compare(agent_action, oracle_action) {
            return Ok(false);
        }
        match &self.soft {
            Some(soft) => soft.compare(agent_action, oracle_action, ctx),
            None => Ok(true),
        }
    }
}

impl Default for MildToolJudge {
    fn default() -> Self {
        Self { hard: HardToolJudge::new(ArgCheckerConfig::default()), soft: Some(SoftToolJudge::new(Arc::new(NullSoftChecker), Vec::new())) }
    }
}

#[cfg(test)]
#[path = "tool_judge_tests.rs"]
mod tests;
