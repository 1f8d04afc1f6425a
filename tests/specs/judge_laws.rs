// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Judge laws: properties every judge configuration must hold
//! regardless of which scenario it is wired to, rather than a single
//! scenario's pass/fail outcome.

use std::collections::HashMap;
use std::sync::Arc;

use are_apps::demo::AgentUserInterfaceApp;
use are_apps::ToolRegistry;
use are_core::{Action, CompletedEvent, Event, EventId, EventMeta, IntoOracle, OracleEvent};
use are_env::{Environment, EnvironmentConfig, TickOutcome, ToolAugmentationConfig};
use are_judge::checkers::{list_attendees_checker, unordered_list_checker, unordered_path_list_checker};
use are_judge::{AgentEventJudge, ArgCheckerConfig, CheckerType, EventTimeConfig, GraphPerEventJudge, MildToolJudge, SoftCheckContext};
use serde_json::json;

fn message_judge() -> GraphPerEventJudge {
    let mut tool_judges = HashMap::new();
    tool_judges.insert(
        "AgentUserInterface__send_message_to_user".to_string(),
        MildToolJudge::hard_only(ArgCheckerConfig::new().with_checker("content", CheckerType::Eq)),
    );
    GraphPerEventJudge::new(AgentEventJudge::new(EventTimeConfig::default(), tool_judges))
}

fn two_reply_flow() -> (ToolRegistry, Vec<Event>) {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(AgentUserInterfaceApp::new()));

    let mut user_prompt = Event::user(EventMeta::new(EventId::from_string("law-user")), None);
    user_prompt.meta_mut().event_time = Some(0.0);

    let first_action = Action::new("AgentUserInterface", "send_message_to_user").with_arg("content", "I'm on it.");
    let mut first_reply = Event::agent(EventMeta::new(EventId::from_string("law-reply-1")), Some(first_action));
    first_reply.depends_on(&mut [&mut user_prompt], 1.0);

    let second_action = Action::new("AgentUserInterface", "send_message_to_user").with_arg("content", "Done.");
    let mut second_reply = Event::agent(EventMeta::new(EventId::from_string("law-reply-2")), Some(second_action));
    second_reply.depends_on(&mut [&mut first_reply], 1.0);

    (registry, vec![user_prompt, first_reply, second_reply])
}

fn run_to_completion(registry: ToolRegistry, events: Vec<Event>) -> Vec<CompletedEvent> {
    let env = Environment::new(EnvironmentConfig::default(), ToolAugmentationConfig::none(), registry);
    for event in events {
        env.schedule(event);
    }
    loop {
        match env.tick().unwrap() {
            TickOutcome::Executed(_) => continue,
            TickOutcome::Stopped | TickOutcome::QueueEmpty => break,
        }
    }
    env.log_entries()
}

fn oracle_of(events: Vec<Event>) -> Vec<OracleEvent> {
    events.into_iter().filter(|e| matches!(e, Event::Agent(_))).map(IntoOracle::oracle).collect()
}

/// Reflexivity: an oracle trace judged against the agent log that
/// produced it always succeeds.
#[test]
fn reflexivity() {
    let (registry, events) = two_reply_flow();
    let oracle = oracle_of(events.clone());
    let log = run_to_completion(registry, events);

    let judgment = message_judge().judge(&log, &oracle, &SoftCheckContext::default()).unwrap();
    assert!(judgment.success, "{:?}", judgment.failure);
}

/// Extra clarifying `send_message_to_user` calls beyond what the oracle
/// expects are tolerated up to the configured slack, and rejected beyond it.
#[test]
fn extra_send_message_to_user_tolerance() {
    let (registry, events) = two_reply_flow();
    let full_oracle = oracle_of(events.clone());
    let closing_only: Vec<OracleEvent> = full_oracle.into_iter().skip(1).collect();
    let log = run_to_completion(registry, events);

    let lenient = message_judge().with_extra_send_message_to_user_allowed(1).judge(&log, &closing_only, &SoftCheckContext::default()).unwrap();
    assert!(lenient.success, "{:?}", lenient.failure);

    let strict = message_judge().with_extra_send_message_to_user_allowed(0).judge(&log, &closing_only, &SoftCheckContext::default()).unwrap();
    assert!(!strict.success);
}

/// Hard checkers documented as order-insensitive must actually be:
/// permuting a list argument must not change the verdict.
#[test]
fn unordered_checkers_are_order_insensitive() {
    let agent = json!(["alice@example.com", "bob@example.com", "carol@example.com"]);
    let oracle = json!(["carol@example.com", "alice@example.com", "bob@example.com"]);
    assert!(unordered_list_checker(&agent, &oracle));

    let agent_paths = json!(["notes/a.txt", "notes/b.txt"]);
    let oracle_paths = json!(["notes/b.txt", "notes/a.txt"]);
    assert!(unordered_path_list_checker(&agent_paths, &oracle_paths));

    let agent_attendees = json!(["Greg", "Alice"]);
    let oracle_attendees = json!(["Alice", "Greg"]);
    assert!(list_attendees_checker(&agent_attendees, &oracle_attendees, &[]));
}

/// A permutation that also drops or adds an element must still fail.
#[test]
fn unordered_checkers_still_detect_a_real_difference() {
    let agent = json!(["alice@example.com", "bob@example.com"]);
    let oracle = json!(["alice@example.com", "carol@example.com"]);
    assert!(!unordered_list_checker(&agent, &oracle));
}
