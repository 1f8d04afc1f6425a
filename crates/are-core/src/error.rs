// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for scenario authoring and the event loop.
//!
//! Execution failures (a tool call throwing) are data, not errors — they
//! are captured on the `CompletedEvent`'s metadata and never propagate.
//! Only authoring mistakes and loop-fatal conditions are `Error` types.

use crate::event::EventId;
use thiserror::Error;

/// A scenario-authoring mistake: a DAG invariant violation, an unknown
/// app/function, or a malformed timing field. Surfaced synchronously at
/// scenario build time, never at runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthoringError {
    #[error("event {0} has both event_time and event_relative_time set")]
    BothTimingFieldsSet(EventId),

    #[error("event {0} has a negative event_relative_time")]
    NegativeRelativeTime(EventId),

    #[error("event {0} has a negative event_time")]
    NegativeEventTime(EventId),

    #[error("dependency cycle detected, starting at event {0}")]
    CyclicDependency(EventId),

    #[error("AGENT event {0} has no dependencies (I4: must follow a user prompt or tool call)")]
    AgentEventWithoutDependency(EventId),

    #[error("more than one conversation branch: events {0} and {1} both carry user<->agent exchanges")]
    MultipleConversationBranches(EventId, EventId),

    #[error(
        "event {0} depends on a send_message_to_user output within the same turn (I6)"
    )]
    DependsOnSameTurnUserMessage(EventId),

    #[error("ENV event {0} must have exactly one USER/ENV/send_message_to_agent dependency, found {1}")]
    InvalidEnvDependencyCount(EventId, usize),

    #[error("unknown app {0:?}")]
    UnknownApp(String),

    #[error("unknown tool {0:?} on app {1:?}")]
    UnknownTool(String, String),

    #[error("event {0} references unknown dependency {1}")]
    UnknownDependency(EventId, EventId),

    #[error("turn-time validation failed for event {0}: {1}")]
    TurnTimeViolation(EventId, String),
}

/// A loop-fatal condition: escalated from a `ConditionCheckEvent` or
/// `ValidationEvent` that ran out its timeout, or a minefield that fired.
/// Transitions the environment to `Failed` and stops the loop.
#[derive(Debug, Error, PartialEq)]
pub enum LoopError {
    #[error("condition event {0} timed out after {1} ticks")]
    ConditionTimeout(EventId, u32),

    #[error("validation event {0} timed out before milestones {1:?} were achieved")]
    ValidationTimeout(EventId, Vec<String>),

    #[error("validation event {0} triggered minefield {1:?}")]
    MinefieldTriggered(EventId, String),

    #[error("oracle replay of event {0} failed: {1}")]
    OracleRunError(EventId, String),
}
