use super::*;
use crate::app::{App, AppError, ToolSpec};
use crate::capture::CaptureScope;
use are_core::OperationType;
use indexmap::IndexMap;
use serde_json::json;
use std::sync::Arc;

struct CounterApp {
    count: parking_lot::Mutex<i64>,
}

impl App for CounterApp {
    fn name(&self) -> &str {
        "Counter"
    }

    fn tools(&self) -> Vec<ToolSpec> {
        vec![ToolSpec::new("increment", OperationType::Write, "bumps the counter")]
    }

    fn call(&self, function_name: &str, _args: &IndexMap<String, Value>) -> Result<Value, AppError> {
        match function_name {
            "increment" => {
                let mut count = self.count.lock();
                *count += 1;
                Ok(json!(*count))
            }
            other => Err(AppError::UnknownFunction { app: self.name().to_string(), function: other.to_string() }),
        }
    }

    fn state(&self) -> Value {
        json!({"count": *self.count.lock()})
    }

    fn load_state(&self, state: Value) -> Result<(), AppError> {
        let count = state.get("count").and_then(Value::as_i64).unwrap_or(0);
        *self.count.lock() = count;
        Ok(())
    }

    fn reset(&self) {
        *self.count.lock() = 0;
    }
}

fn registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CounterApp { count: parking_lot::Mutex::new(0) }));
    registry
}

#[test]
fn invoking_an_unknown_app_fails() {
    let registry = registry();
    let err = registry.invoke("DoesNotExist", "noop", &IndexMap::new()).unwrap_err();
    assert_eq!(err, RegistryError::UnknownApp("DoesNotExist".to_string()));
}

#[test]
fn invoking_a_registered_app_dispatches_to_it() {
    let registry = registry();
    let result = registry.invoke("Counter", "increment", &IndexMap::new()).unwrap();
    assert_eq!(result, json!(1));
    assert_eq!(registry.app_state("Counter"), Some(json!({"count": 1})));
}

#[test]
fn state_snapshot_covers_every_registered_app() {
    let registry = registry();
    let snapshot = registry.state_snapshot();
    assert_eq!(snapshot["Counter"], json!({"count": 0}));
}

#[test]
fn invoking_inside_a_capture_scope_records_one_event() {
    let registry = registry();
    let scope = CaptureScope::open();
    registry.invoke("Counter", "increment", &IndexMap::new()).unwrap();
    let captured = scope.end();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].app_name, "Counter");
    assert_eq!(captured[0].function_name, "increment");
}

#[test]
fn capture_authors_an_action_without_mutating_app_state() {
    let registry = registry();
    let action = registry.capture("Counter", "increment", IndexMap::new()).unwrap();
    assert_eq!(action.app_name, "Counter");
    assert_eq!(action.function_name, "increment");
    assert_eq!(action.operation_type, OperationType::Write);
    assert_eq!(registry.app_state("Counter"), Some(json!({"count": 0})));
}

#[test]
fn capture_against_an_unknown_function_fails() {
    let registry = registry();
    let err = registry.capture("Counter", "nope", IndexMap::new()).unwrap_err();
    assert_eq!(err, RegistryError::App(AppError::UnknownFunction { app: "Counter".to_string(), function: "nope".to_string() }));
}

#[test]
fn load_state_snapshot_restores_only_named_apps() {
    let registry = registry();
    registry.invoke("Counter", "increment", &IndexMap::new()).unwrap();
    assert_eq!(registry.app_state("Counter"), Some(json!({"count": 1})));

    let mut snapshot = std::collections::HashMap::new();
    snapshot.insert("Counter".to_string(), json!({"count": 42}));
    registry.load_state_snapshot(&snapshot).unwrap();
    assert_eq!(registry.app_state("Counter"), Some(json!({"count": 42})));
}

#[test]
fn reset_all_resets_every_app() {
    let registry = registry();
    registry.invoke("Counter", "increment", &IndexMap::new()).unwrap();
    registry.reset_all();
    assert_eq!(registry.app_state("Counter"), Some(json!({"count": 0})));
}
