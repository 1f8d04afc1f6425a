// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool-call actions: the payload carried by USER/ENV/AGENT events.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::EventId;

/// Whether a tool call only reads app state or mutates it. Hard checkers
/// use this to tell "agent read the calendar" apart from "agent booked a
/// meeting" without inspecting the app implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationType {
    Read,
    Write,
}

/// A single tool invocation: which app, which function, with which
/// arguments. `args` values may contain a `{{event_id}}` placeholder that
/// is resolved against a prior event's captured return value just before
/// the call executes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub app_name: String,
    pub function_name: String,
    pub args: IndexMap<String, Value>,
    pub operation_type: OperationType,
}

impl Action {
    pub fn new(app_name: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            function_name: function_name.into(),
            args: IndexMap::new(),
            operation_type: OperationType::Write,
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    pub fn with_operation_type(mut self, op: OperationType) -> Self {
        self.operation_type = op;
        self
    }

    pub fn with_args(mut self, args: IndexMap<String, Value>) -> Self {
        self.args = args;
        self
    }
}

/// Scans a string value for `{{event-id}}` placeholders, replacing each with
/// the JSON-encoded return value recorded for that event id. Unknown ids are
/// left untouched rather than erroring, since a placeholder may legitimately
/// reference an event that has not completed yet at authoring time.
pub fn resolve_placeholders(args: &IndexMap<String, Value>, return_values: &HashMap<EventId, Value>) -> IndexMap<String, Value> {
    args.iter()
        .map(|(k, v)| (k.clone(), resolve_value(v, return_values)))
        .collect()
}

fn resolve_value(value: &Value, return_values: &HashMap<EventId, Value>) -> Value {
    match value {
        Value::String(s) => resolve_string(s, return_values),
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| resolve_value(v, return_values)).collect())
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), resolve_value(v, return_values)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn resolve_string(s: &str, return_values: &HashMap<EventId, Value>) -> Value {
    if let (Some(start), Some(end)) = (s.find("{{"), s.find("}}")) {
        if start < end {
            let placeholder = &s[start + 2..end];
            let event_id = EventId::from_string(placeholder);
            if let Some(resolved) = return_values.get(&event_id) {
                let prefix = &s[..start];
                let suffix = &s[end + 2..];
                if prefix.is_empty() && suffix.is_empty() {
                    return resolved.clone();
                }
                let resolved_str = match resolved {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                return Value::String(format!("{prefix}{resolved_str}{suffix}"));
            }
        }
    }
    Value::String(s.to_string())
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
