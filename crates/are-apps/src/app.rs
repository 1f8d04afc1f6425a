// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `App` trait: a stateful tool surface an event's `Action` can target.

use are_core::OperationType;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

/// Describes one callable function on an app, for tool-registry discovery
/// and for the hard checkers that key off read/write classification.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub function_name: String,
    pub operation_type: OperationType,
    pub description: String,
}

impl ToolSpec {
    pub fn new(function_name: impl Into<String>, operation_type: OperationType, description: impl Into<String>) -> Self {
        Self { function_name: function_name.into(), operation_type, description: description.into() }
    }
}

/// Failure surfaced by a tool call. Distinct from [`are_core::LoopError`]:
/// an `AppError` is captured onto the triggering event's metadata and the
/// loop continues, it never aborts the simulation by itself.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AppError {
    #[error("app {app} has no function {function:?}")]
    UnknownFunction { app: String, function: String },

    #[error("invalid argument to {app}.{function}: {message}")]
    InvalidArgument { app: String, function: String, message: String },

    #[error("{app}.{function} failed: {message}")]
    Failed { app: String, function: String, message: String },
}

/// A stateful tool surface. Apps are registered by name with a
/// [`crate::ToolRegistry`]; the environment dispatches `Action`s against
/// them and the registry wraps each call with event capture.
pub trait App: Send + Sync {
    /// Name the app is registered and referenced under, e.g. `"Calendar"`.
    fn name(&self) -> &str;

    /// Every function this app exposes, for scenario validation and for
    /// agents that introspect the tool surface.
    fn tools(&self) -> Vec<ToolSpec>;

    /// Invoke `function_name` with `args`, returning its JSON result.
    fn call(&self, function_name: &str, args: &IndexMap<String, Value>) -> Result<Value, AppError>;

    /// A JSON snapshot of the app's current state, used by condition and
    /// validation predicates through [`are_core::EnvironmentView`].
    fn state(&self) -> Value {
        Value::Null
    }

    /// Replace the app's state with a value previously returned by
    /// [`App::state`]. Used to restore an [`crate::ToolRegistry`] snapshot.
    /// The default no-op suits apps with nothing worth snapshotting.
    fn load_state(&self, _state: Value) -> Result<(), AppError> {
        Ok(())
    }

    /// Reset the app back to its construction-time state.
    fn reset(&self) {}

    fn tool_spec(&self, function_name: &str) -> Option<ToolSpec> {
        self.tools().into_iter().find(|t| t.function_name == function_name)
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
