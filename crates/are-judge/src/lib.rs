// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! are-judge: compares a recorded agent trace against a scenario's
//! oracle trace. Hard/soft tool checkers (C8), per-event judges (C9),
//! the graph-per-event judge (C10), and the in-context baseline (C11).

pub mod checkers;
pub mod event_judge;
pub mod graph_judge;
pub mod in_context_judge;
pub mod judgment;
pub mod soft;
pub mod tool_judge;

pub use checkers::CheckerType;
pub use event_judge::{AgentEventJudge, EnvUserEventJudge, EventTimeConfig};
pub use graph_judge::GraphPerEventJudge;
pub use in_context_judge::{BulletEventDescription, InContextJudge, JudgeEngine, NullJudgeEngine};
pub use judgment::{
    EnvOracleMatchingFailure, EventComparisonFailure, EventComparisonFailureType, JudgeFailure,
    Judgment, OracleEventMatchingFailure, ToolCallCountsFailure,
};
pub use soft::{JudgeError, NullSoftChecker, NullSubtaskExtractor, SoftCheckContext, SoftChecker, SubtaskExtractor};
pub use tool_judge::{ArgCheckerConfig, HardToolJudge, MildToolJudge, SoftToolJudge};
