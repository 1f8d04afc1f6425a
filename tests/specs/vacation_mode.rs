// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario S4: no structural oracle DAG. A validation event polls four
//! milestones (a light off, the thermostat reduced, the door still
//! locked, the camera still recording) against the `SmartHome` app;
//! success is the run finishing without hitting the validation timeout,
//! not a graph-judge match.

use std::sync::Arc;

use are_apps::demo::SmartHomeApp;
use are_apps::{App, ToolRegistry};
use are_core::{Action, ConditionPredicate, Event, EventId, EventMeta, LoopError, ValidationEvent};
use are_env::{Environment, EnvironmentConfig, TickOutcome, ToolAugmentationConfig};
use indexmap::IndexMap;
use serde_json::json;

fn any_light_off() -> ConditionPredicate {
    ConditionPredicate::new("light_off", |view| {
        view.app_state("SmartHome")
            .and_then(|v| v.get("lights").and_then(|l| l.as_object().cloned()))
            .is_some_and(|lights| lights.values().any(|on| on.as_bool() == Some(false)))
    })
}

fn thermostat_reduced() -> ConditionPredicate {
    ConditionPredicate::new("thermostat_reduced", |view| {
        view.app_state("SmartHome").and_then(|v| v.get("thermostat_f").and_then(|t| t.as_f64())).is_some_and(|f| f < 70.0)
    })
}

fn door_locked() -> ConditionPredicate {
    ConditionPredicate::new("door_locked", |view| {
        view.app_state("SmartHome").and_then(|v| v.get("door_locked").and_then(|b| b.as_bool())).unwrap_or(false)
    })
}

fn camera_recording() -> ConditionPredicate {
    ConditionPredicate::new("camera_recording", |view| {
        view.app_state("SmartHome").and_then(|v| v.get("camera_recording").and_then(|b| b.as_bool())).unwrap_or(false)
    })
}

fn milestones() -> Vec<ConditionPredicate> {
    vec![any_light_off(), thermostat_reduced(), door_locked(), camera_recording()]
}

fn env_with_home() -> Environment {
    let home = SmartHomeApp::new();
    home.add_light("kitchen", true);
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(home));
    Environment::new(EnvironmentConfig::default(), ToolAugmentationConfig::none(), registry)
}

fn run_to_completion(env: &Environment) -> Result<(), LoopError> {
    env.run_until_stop()
}

#[test]
fn all_four_milestones_flipping_in_time_succeeds() {
    let env = env_with_home();

    let validation = ValidationEvent::new(EventMeta::new(EventId::from_string("vacation-check")), milestones()).with_timeout_ticks(10);
    env.schedule(Event::Validation(validation));

    let mut light_off = EventMeta::new(EventId::from_string("turn-off-kitchen"));
    light_off.event_time = Some(2.0);
    env.schedule(Event::agent(light_off, Some(Action::new("SmartHome", "set_light").with_arg("name", "kitchen").with_arg("on", false))));

    let mut lower_thermostat = EventMeta::new(EventId::from_string("lower-thermostat"));
    lower_thermostat.event_time = Some(3.0);
    env.schedule(Event::agent(
        lower_thermostat,
        Some(Action::new("SmartHome", "set_thermostat").with_arg("target_f", 62.0)),
    ));

    let result = run_to_completion(&env);
    assert!(result.is_ok(), "{result:?}");

    let entries = env.log_entries();
    let check = entries.iter().find(|e| e.event_id == EventId::from_string("vacation-check")).expect("validation event logged");
    assert!(check.is_success());
}

#[test]
fn milestones_not_met_before_the_timeout_fails() {
    let env = env_with_home();

    // Timeout is shorter than when the agent gets around to acting, so
    // the vacation-mode validation never sees the light go off or the
    // thermostat drop.
    let validation = ValidationEvent::new(EventMeta::new(EventId::from_string("vacation-check")), milestones()).with_timeout_ticks(2);
    env.schedule(Event::Validation(validation));

    let mut light_off = EventMeta::new(EventId::from_string("turn-off-kitchen"));
    light_off.event_time = Some(5.0);
    env.schedule(Event::agent(light_off, Some(Action::new("SmartHome", "set_light").with_arg("name", "kitchen").with_arg("on", false))));

    let err = run_to_completion(&env).unwrap_err();
    assert!(matches!(err, LoopError::ValidationTimeout(_, ref unachieved) if unachieved.contains(&"light_off".to_string())));
}

#[test]
fn a_minefield_aborts_the_run_immediately() {
    let env = env_with_home();

    let mut events = milestones();
    events.truncate(2);
    let validation = ValidationEvent::new(EventMeta::new(EventId::from_string("vacation-check")), events)
        .with_minefields(vec![ConditionPredicate::new("door_unlocked", |view| {
            !view.app_state("SmartHome").and_then(|v| v.get("door_locked").and_then(|b| b.as_bool())).unwrap_or(true)
        })])
        .with_timeout_ticks(10);
    env.schedule(Event::Validation(validation));

    let mut unlock = EventMeta::new(EventId::from_string("unlock-door"));
    unlock.event_time = Some(1.0);
    env.schedule(Event::agent(unlock, Some(Action::new("SmartHome", "set_door_lock").with_arg("locked", false))));

    let err = run_to_completion(&env).unwrap_err();
    assert!(matches!(err, LoopError::MinefieldTriggered(_, name) if name == "door_unlocked"));
}
