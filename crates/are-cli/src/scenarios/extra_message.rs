// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario S5: the agent sends two user-facing messages where the
//! oracle only expects one. Demonstrates
//! `extra_send_message_to_user_allowed` tolerance rather than a failure.

use std::sync::Arc;

use are_apps::demo::AgentUserInterfaceApp;
use are_apps::ToolRegistry;
use are_core::{Action, Event, EventMeta, EventId, IntoOracle, OracleEvent};
use are_scenario::Scenario;
use indexmap::IndexMap;
use serde_json::json;

/// Author a `send_message_to_user` action via capture mode rather than
/// hand-building the `Action` literal.
fn capture_reply(registry: &ToolRegistry, content: &str) -> Action {
    let mut args = IndexMap::new();
    args.insert("content".to_string(), json!(content));
    registry.capture("AgentUserInterface", "send_message_to_user", args.clone()).unwrap_or_else(|err| {
        tracing::error!(%err, "capture against AgentUserInterface failed, authoring a literal action instead");
        Action::new("AgentUserInterface", "send_message_to_user").with_args(args)
    })
}

pub struct ExtraMessageScenario;

impl Scenario for ExtraMessageScenario {
    fn name(&self) -> &str {
        "extra-message-tolerance"
    }

    fn init_and_populate_apps(&self) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(AgentUserInterfaceApp::new()));
        registry
    }

    fn build_events_flow(&self, registry: &ToolRegistry) -> Vec<Event> {
        let mut user_prompt = Event::user(EventMeta::new(EventId::from_string("extra-message-user")), None);
        user_prompt.meta_mut().event_time = Some(0.0);

        let first_action = capture_reply(registry, "I'm on it.");
        let mut first_reply = Event::agent(EventMeta::new(EventId::from_string("extra-message-reply-1")), Some(first_action));
        first_reply.depends_on(&mut [&mut user_prompt], 1.0);

        let second_action = capture_reply(registry, "Done.");
        let mut second_reply = Event::agent(EventMeta::new(EventId::from_string("extra-message-reply-2")), Some(second_action));
        second_reply.depends_on(&mut [&mut first_reply], 1.0);

        vec![user_prompt, first_reply, second_reply]
    }

    fn oracle_events(&self) -> Vec<OracleEvent> {
        let registry = self.init_and_populate_apps();
        let mut user_prompt = Event::user(EventMeta::new(EventId::from_string("extra-message-user")), None);
        user_prompt.meta_mut().event_time = Some(0.0);

        let action = capture_reply(&registry, "Done.");
        let mut reply = Event::agent(EventMeta::new(EventId::from_string("extra-message-reply-2")), Some(action));
        reply.depends_on(&mut [&mut user_prompt], 1.0);

        vec![reply.oracle()]
    }
}

#[cfg(test)]
#[path = "extra_message_tests.rs"]
mod tests;
