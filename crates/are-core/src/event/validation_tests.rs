// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::event::EventId;

struct FlagEnv(bool);
impl EnvironmentView for FlagEnv {
    fn time(&self) -> f64 {
        0.0
    }
    fn app_state(&self, _app_name: &str) -> Option<serde_json::Value> {
        Some(serde_json::json!({"flag": self.0}))
    }
}

fn flag_milestone(name: &str) -> Milestone {
    Milestone::new(name, |env| {
        env.app_state("flag").and_then(|v| v.get("flag").and_then(|f| f.as_bool())).unwrap_or(false)
    })
}

#[test]
fn completes_once_every_milestone_has_fired() {
    let mut event = ValidationEvent::new(
        EventMeta::new(EventId::new()),
        vec![flag_milestone("a"), flag_milestone("b")],
    );
    assert!(event.poll(&FlagEnv(false)).is_none());
    assert!(!event.is_complete());
    assert!(event.poll(&FlagEnv(true)).is_none());
    assert!(event.is_complete());
    assert_eq!(event.unachieved_milestones(), Vec::<String>::new());
}

#[test]
fn a_fired_minefield_is_reported_by_name() {
    let mut event = ValidationEvent::new(EventMeta::new(EventId::new()), vec![])
        .with_minefields(vec![flag_milestone("danger")]);
    assert_eq!(event.poll(&FlagEnv(false)), None);
    assert_eq!(event.poll(&FlagEnv(true)), Some("danger".to_string()));
}

#[test]
fn times_out_once_check_count_reaches_the_limit() {
    let mut event = ValidationEvent::new(EventMeta::new(EventId::new()), vec![flag_milestone("a")])
        .with_timeout_ticks(1);
    assert!(!event.has_timed_out());
    event.poll(&FlagEnv(false));
    assert!(event.has_timed_out());
    assert_eq!(event.unachieved_milestones(), vec!["a".to_string()]);
}
