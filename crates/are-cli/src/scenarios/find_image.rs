// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario S1: a sandbox filesystem seeded with ten `.txt` files and
//! one `llama.jpg`; the user asks the agent to find the image, and the
//! oracle expects a `send_message_to_user` naming it.

use std::sync::Arc;

use are_apps::demo::{AgentUserInterfaceApp, SandboxFilesystemApp};
use are_apps::{App, ToolRegistry};
use are_core::{Action, Event, EventMeta, EventId, IntoOracle, OracleEvent};
use are_scenario::Scenario;
use indexmap::IndexMap;
use serde_json::json;

pub struct FindImageScenario;

impl Scenario for FindImageScenario {
    fn name(&self) -> &str {
        "find-image"
    }

    fn init_and_populate_apps(&self) -> ToolRegistry {
        let filesystem = SandboxFilesystemApp::new();
        for n in 1..=10 {
            let mut args = IndexMap::new();
            args.insert("path".to_string(), json!(format!("notes_{n}.txt")));
            args.insert("content".to_string(), json!("just some text"));
            let _ = filesystem.call("write_file", &args);
        }
        let mut args = IndexMap::new();
        args.insert("path".to_string(), json!("llama.jpg"));
        args.insert("content".to_string(), json!("<binary jpeg data>"));
        let _ = filesystem.call("write_file", &args);

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(filesystem));
        registry.register(Arc::new(AgentUserInterfaceApp::new()));
        registry
    }

    fn build_events_flow(&self, registry: &ToolRegistry) -> Vec<Event> {
        let mut user_prompt = Event::user(EventMeta::new(EventId::from_string("find-image-user")), None);
        user_prompt.meta_mut().event_time = Some(0.0);

        let mut reply_args = IndexMap::new();
        reply_args.insert("content".to_string(), json!("llama.jpg"));
        let reply_action = registry.capture("AgentUserInterface", "send_message_to_user", reply_args.clone()).unwrap_or_else(|err| {
            tracing::error!(%err, "capture against AgentUserInterface failed, authoring a literal action instead");
            Action::new("AgentUserInterface", "send_message_to_user").with_args(reply_args)
        });
        let mut reply = Event::agent(EventMeta::new(EventId::from_string("find-image-reply")), Some(reply_action));
        reply.depends_on(&mut [&mut user_prompt], 1.0);

        vec![user_prompt, reply]
    }

    fn oracle_events(&self) -> Vec<OracleEvent> {
        let registry = self.init_and_populate_apps();
        let events = self.build_events_flow(&registry);
        events
            .into_iter()
            .filter(|e| matches!(e, Event::Agent(_)))
            .map(IntoOracle::oracle)
            .collect()
    }
}

#[cfg(test)]
#[path = "find_image_tests.rs"]
mod tests;
