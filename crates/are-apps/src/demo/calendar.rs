// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A flat list of calendar events, ordered by start time.

use are_core::OperationType;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::app::{App, AppError, ToolSpec};

#[derive(Default)]
pub struct CalendarApp {
    events: Mutex<Vec<Value>>,
}

impl CalendarApp {
    pub fn new() -> Self {
        Self::default()
    }
}

impl App for CalendarApp {
    fn name(&self) -> &str {
        "Calendar"
    }

    fn tools(&self) -> Vec<ToolSpec> {
        vec![
            ToolSpec::new("create_event", OperationType::Write, "adds an event to the calendar"),
            ToolSpec::new("list_events", OperationType::Read, "lists every calendar event, ordered by start time"),
        ]
    }

    fn call(&self, function_name: &str, args: &IndexMap<String, Value>) -> Result<Value, AppError> {
        match function_name {
            "create_event" => {
                let title = args.get("title").and_then(Value::as_str).ok_or_else(|| AppError::InvalidArgument {
                    app: self.name().to_string(),
                    function: function_name.to_string(),
                    message: "missing string argument \"title\"".to_string(),
                })?;
                let start_time = args.get("start_time").and_then(Value::as_f64).ok_or_else(|| AppError::InvalidArgument {
                    app: self.name().to_string(),
                    function: function_name.to_string(),
                    message: "missing numeric argument \"start_time\"".to_string(),
                })?;
                let mut events = self.events.lock();
                events.push(json!({"title": title, "start_time": start_time}));
                events.sort_by(|a, b| a["start_time"].as_f64().unwrap_or(0.0).total_cmp(&b["start_time"].as_f64().unwrap_or(0.0)));
                Ok(Value::Null)
            }
            "list_events" => Ok(json!(*self.events.lock())),
            other => Err(AppError::UnknownFunction { app: self.name().to_string(), function: other.to_string() }),
        }
    }

    fn state(&self) -> Value {
        json!({ "events": *self.events.lock() })
    }

    fn load_state(&self, state: Value) -> Result<(), AppError> {
        let events = state.get("events").cloned().unwrap_or_else(|| json!([]));
        let events: Vec<Value> = serde_json::from_value(events).map_err(|e| AppError::Failed {
            app: self.name().to_string(),
            function: "load_state".to_string(),
            message: e.to_string(),
        })?;
        *self.events.lock() = events;
        Ok(())
    }

    fn reset(&self) {
        self.events.lock().clear();
    }
}

#[cfg(test)]
#[path = "calendar_tests.rs"]
mod tests;
