// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario S3: the oracle places a calendar event against an absolute
//! deadline (`t=10800`) with `event_time_comparator=LESS_THAN` rather
//! than a turn-relative delay. An agent that books the event before the
//! deadline passes regardless of exactly how early; one that books it
//! after fails the time check even though the tool arguments match
//! exactly.

use std::collections::HashMap;

use are_apps::App;
use are_apps::demo::CalendarApp;
use are_core::{Action, CompletedEvent, Event, EventId, EventMeta, EventType, EventMetadata, EventTimeComparator, IntoOracle, OracleEvent};
use are_judge::{AgentEventJudge, ArgCheckerConfig, CheckerType, EventTimeConfig, GraphPerEventJudge, MildToolJudge, SoftCheckContext};
use indexmap::IndexMap;
use serde_json::json;

const DEADLINE: f64 = 10_800.0;

fn book_action() -> Action {
    Action::new("Calendar", "create_event").with_arg("title", "Q3 business review").with_arg("start_time", DEADLINE - 100.0)
}

fn agent_log_at(completion_time: f64) -> Vec<CompletedEvent> {
    let action = book_action();
    let calendar = CalendarApp::new();
    let mut args = IndexMap::new();
    args.insert("title".to_string(), json!("Q3 business review"));
    args.insert("start_time".to_string(), json!(DEADLINE - 100.0));
    let result = calendar.call("create_event", &args).unwrap_or(serde_json::Value::Null);

    vec![CompletedEvent::new(
        EventId::from_string("qbr-booked"),
        EventType::Agent,
        Some(action),
        EventMetadata::success(completion_time, result),
    )]
}

fn oracle() -> Vec<OracleEvent> {
    let mut meta = EventMeta::new(EventId::from_string("qbr-booked"));
    meta.event_time = Some(DEADLINE);
    let event = Event::agent(meta, Some(book_action()));
    vec![event.oracle().with_comparator(EventTimeComparator::LessThan).with_absolute_event_time(DEADLINE)]
}

fn judge() -> GraphPerEventJudge {
    let mut tool_judges = HashMap::new();
    tool_judges.insert(
        "Calendar__create_event".to_string(),
        MildToolJudge::hard_only(
            ArgCheckerConfig::new().with_checker("title", CheckerType::EqStrStrip).with_checker("start_time", CheckerType::Eq),
        ),
    );
    GraphPerEventJudge::new(AgentEventJudge::new(EventTimeConfig::default(), tool_judges))
}

#[test]
fn booking_before_the_deadline_passes() {
    let log = agent_log_at(10_700.0);
    let judgment = judge().judge(&log, &oracle(), &SoftCheckContext::default()).unwrap();
    assert!(judgment.success, "{:?}", judgment.failure);
}

#[test]
fn booking_after_the_deadline_fails_the_time_check() {
    // post_event_tolerance_seconds defaults to 25s, so 10_900 (100s late)
    // is well outside tolerance even though the arguments match exactly.
    let log = agent_log_at(10_900.0);
    let judgment = judge().judge(&log, &oracle(), &SoftCheckContext::default()).unwrap();
    assert!(!judgment.success);
}

#[test]
fn booking_right_at_the_post_tolerance_boundary_passes() {
    let log = agent_log_at(DEADLINE + EventTimeConfig::default().post_event_tolerance_seconds);
    let judgment = judge().judge(&log, &oracle(), &SoftCheckContext::default()).unwrap();
    assert!(judgment.success, "{:?}", judgment.failure);
}
