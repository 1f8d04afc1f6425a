// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the [`GraphPerEventJudge`] used to score a scenario run. Real
//! scenario authoring would carry `per_tool_arg_to_checker_type`
//! alongside the scenario file; the bundled demo scenarios hardcode the
//! one tool judge each of them needs.

use std::collections::HashMap;

use are_judge::{AgentEventJudge, ArgCheckerConfig, CheckerType, EventTimeConfig, GraphPerEventJudge, MildToolJudge};

pub fn build(extra_send_message_to_user_allowed: usize) -> GraphPerEventJudge {
    let mut tool_judges = HashMap::new();
    tool_judges.insert(
        "AgentUserInterface__send_message_to_user".to_string(),
        MildToolJudge::hard_only(ArgCheckerConfig::new().with_checker("content", CheckerType::Eq)),
    );

    let agent_judge = AgentEventJudge::new(EventTimeConfig::default(), tool_judges);
    GraphPerEventJudge::new(agent_judge).with_extra_send_message_to_user_allowed(extra_send_message_to_user_allowed)
}
