// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `{{event_id}}` placeholders in a not-yet-executed action's arguments
//! resolve against the return value of the event they name, at the
//! moment the action actually runs — not at authoring time.

use std::sync::Arc;

use are_apps::demo::MessagingApp;
use are_apps::ToolRegistry;
use are_core::{Action, Event, EventId, EventMeta};
use are_env::{Environment, EnvironmentConfig, TickOutcome, ToolAugmentationConfig};

fn run_to_completion(registry: ToolRegistry, events: Vec<Event>) -> Vec<are_core::CompletedEvent> {
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

#[test]
fn later_action_sees_earlier_actions_return_value() {
    let messaging = MessagingApp::new();
    messaging.deliver("welcome-email", "ops@example.com", "Welcome", "glad you're here", None);
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(messaging));

    let mut user_prompt = Event::user(EventMeta::new(EventId::from_string("placeholder-user")), None);
    user_prompt.meta_mut().event_time = Some(0.0);

    let forward_id = EventId::from_string("placeholder-forward");
    let mut forward = Event::agent(
        EventMeta::new(forward_id.clone()),
        Some(
            Action::new("Messaging", "forward_email")
                .with_arg("email_id", "welcome-email")
                .with_arg("recipients", serde_json::json!(["john@example.com"])),
        ),
    );
    forward.depends_on(&mut [&mut user_prompt], 1.0);

    // References the forward's own return value by id, rather than
    // repeating its shape literally.
    let placeholder_content = format!("{{{{{forward_id}}}}}");
    let mut reply = Event::agent(
        EventMeta::new(EventId::from_string("placeholder-reply")),
        Some(Action::new("Messaging", "reply_to_email").with_arg("email_id", "welcome-email").with_arg("content", placeholder_content)),
    );
    reply.depends_on(&mut [&mut forward], 1.0);

    let log = run_to_completion(registry, vec![user_prompt, forward, reply]);

    let forward_entry = log.iter().find(|e| e.event_id == forward_id).expect("forward event ran");
    let forward_return = forward_entry.return_value().expect("forward succeeded").clone();

    let reply_entry = log.iter().find(|e| e.event_id == EventId::from_string("placeholder-reply")).expect("reply event ran");
    let reply_return = reply_entry.return_value().expect("reply succeeded");

    assert_eq!(reply_return["content"], forward_return, "placeholder should resolve to the forward's full return value");
}

#[test]
fn placeholder_naming_an_event_that_never_ran_is_left_untouched() {
    let messaging = MessagingApp::new();
    messaging.deliver("welcome-email", "ops@example.com", "Welcome", "glad you're here", None);
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(messaging));

    let mut user_prompt = Event::user(EventMeta::new(EventId::from_string("placeholder-user-2")), None);
    user_prompt.meta_mut().event_time = Some(0.0);

    let literal = "{{evt-never-ran}}".to_string();
    let mut reply = Event::agent(
        EventMeta::new(EventId::from_string("placeholder-reply-2")),
        Some(Action::new("Messaging", "reply_to_email").with_arg("email_id", "welcome-email").with_arg("content", literal.clone())),
    );
    reply.depends_on(&mut [&mut user_prompt], 1.0);

    let log = run_to_completion(registry, vec![user_prompt, reply]);

    let reply_entry = log.iter().find(|e| e.event_id == EventId::from_string("placeholder-reply-2")).expect("reply event ran");
    let reply_return = reply_entry.return_value().expect("reply succeeded");
    assert_eq!(reply_return["content"], serde_json::json!(literal));
}
