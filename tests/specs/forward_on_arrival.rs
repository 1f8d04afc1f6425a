// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario S2: an email sits in the inbox from the start of the run but
//! the agent must not act on it until the ENV event marking its arrival
//! has fired; a `forward_email` sent any earlier is not a valid match
//! for the oracle trace below.

use std::collections::HashMap;
use std::sync::Arc;

use are_apps::demo::{ContactsApp, MessagingApp};
use are_apps::{App, ToolRegistry};
use are_core::{Action, Event, EventId, EventMeta, IntoOracle, OracleEvent};
use are_env::{Environment, EnvironmentConfig, TickOutcome, ToolAugmentationConfig};
use are_judge::{AgentEventJudge, ArgCheckerConfig, CheckerType, EventTimeConfig, GraphPerEventJudge, MildToolJudge, SoftCheckContext};
use are_scenario::Scenario;
use indexmap::IndexMap;
use serde_json::json;

struct ForwardOnArrivalScenario;

impl Scenario for ForwardOnArrivalScenario {
    fn name(&self) -> &str {
        "forward-on-arrival"
    }

    fn init_and_populate_apps(&self) -> ToolRegistry {
        let contacts = ContactsApp::new();
        let mut args = IndexMap::new();
        args.insert("name".to_string(), json!("Greg"));
        args.insert("email".to_string(), json!("greg@example.com"));
        let _ = contacts.call("add_contact", &args);

        let messaging = MessagingApp::new();
        messaging.deliver("invoice-42", "billing@example.com", "Invoice #42", "payment due", None);

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(contacts));
        registry.register(Arc::new(messaging));
        registry
    }

    fn build_events_flow(&self, _registry: &ToolRegistry) -> Vec<Event> {
        let mut user_prompt = Event::user(EventMeta::new(EventId::from_string("forward-user")), None);
        user_prompt.meta_mut().event_time = Some(0.0);

        // The invoice "arrives" five seconds into the run; forwarding it
        // any earlier would be acting on mail the agent has no business
        // knowing about yet.
        let mut arrival = Event::env(EventMeta::new(EventId::from_string("forward-arrival")), None);
        arrival.depends_on(&mut [&mut user_prompt], 5.0);

        let mut forward = Event::agent(
            EventMeta::new(EventId::from_string("forward-reply")),
            Some(
                Action::new("Messaging", "forward_email")
                    .with_arg("email_id", "invoice-42")
                    .with_arg("recipients", json!(["greg@example.com"])),
            ),
        );
        forward.depends_on(&mut [&mut arrival], 1.0);

        vec![user_prompt, arrival, forward]
    }

    fn oracle_events(&self) -> Vec<OracleEvent> {
        let registry = self.init_and_populate_apps();
        self.build_events_flow(&registry).into_iter().filter(|e| matches!(e, Event::Agent(_))).map(IntoOracle::oracle).collect()
    }
}

fn run_to_completion(scenario: &ForwardOnArrivalScenario) -> Vec<are_core::CompletedEvent> {
    let registry = scenario.init_and_populate_apps();
    let events = scenario.build_events_flow(&registry);
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

fn judge() -> GraphPerEventJudge {
    let mut tool_judges = HashMap::new();
    tool_judges.insert(
        "Messaging__forward_email".to_string(),
        MildToolJudge::hard_only(
            ArgCheckerConfig::new().with_checker("email_id", CheckerType::Eq).with_checker("recipients", CheckerType::UnorderedList),
        ),
    );
    GraphPerEventJudge::new(AgentEventJudge::new(EventTimeConfig::default(), tool_judges))
}

#[test]
fn scenario_validates_cleanly() {
    let scenario = ForwardOnArrivalScenario;
    assert!(scenario.validate().is_ok(), "{:?}", scenario.validate().errors);
}

#[test]
fn forward_after_arrival_matches_the_oracle() {
    let scenario = ForwardOnArrivalScenario;
    let log = run_to_completion(&scenario);
    let judgment = judge().judge(&log, &scenario.oracle_events(), &SoftCheckContext::default()).unwrap();
    assert!(judgment.success, "{:?}", judgment.failure);

    let forward_entry = log.iter().find(|e| e.event_id == EventId::from_string("forward-reply")).unwrap();
    let arrival_entry = log.iter().find(|e| e.event_id == EventId::from_string("forward-arrival")).unwrap();
    assert!(forward_entry.metadata.completion_time > arrival_entry.metadata.completion_time);
}

#[test]
fn wrong_recipient_fails_the_hard_checker() {
    let scenario = ForwardOnArrivalScenario;
    let mut log = run_to_completion(&scenario);
    let forward = log.iter_mut().find(|e| e.event_id == EventId::from_string("forward-reply")).unwrap();
    forward.action.as_mut().unwrap().args.insert("recipients".to_string(), json!(["someone-else@example.com"]));

    let judgment = judge().judge(&log, &scenario.oracle_events(), &SoftCheckContext::default()).unwrap();
    assert!(!judgment.success);
}
