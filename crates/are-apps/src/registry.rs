// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The tool registry: every app reachable from a scenario, keyed by name.

use are_core::Action;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::app::{App, AppError, ToolSpec};
use crate::capture::EventRegisterer;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    #[error("unknown app {0:?}")]
    UnknownApp(String),

    #[error(transparent)]
    App(#[from] AppError),
}

/// Owns every registered app and dispatches `(app_name, function_name)`
/// calls to it, routing each call through [`EventRegisterer`] so the
/// environment can capture exactly one event per top-level invocation.
#[derive(Default)]
pub struct ToolRegistry {
    apps: HashMap<String, Arc<dyn App>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, app: Arc<dyn App>) {
        self.apps.insert(app.name().to_string(), app);
    }

    pub fn app(&self, app_name: &str) -> Option<&Arc<dyn App>> {
        self.apps.get(app_name)
    }

    pub fn app_names(&self) -> Vec<&str> {
        self.apps.keys().map(String::as_str).collect()
    }

    pub fn tools(&self, app_name: &str) -> Option<Vec<ToolSpec>> {
        self.apps.get(app_name).map(|a| a.tools())
    }

    /// Snapshot every registered app's state, keyed by app name.
    pub fn state_snapshot(&self) -> Value {
        Value::Object(
            self.apps
                .iter()
                .map(|(name, app)| (name.clone(), app.state()))
                .collect(),
        )
    }

    pub fn app_state(&self, app_name: &str) -> Option<Value> {
        self.apps.get(app_name).map(|a| a.state())
    }

    /// Restore every app named in `snapshot` to the given state. Apps not
    /// mentioned in `snapshot` are left untouched.
    pub fn load_state_snapshot(&self, snapshot: &HashMap<String, Value>) -> Result<(), RegistryError> {
        for (name, state) in snapshot {
            if let Some(app) = self.apps.get(name) {
                app.load_state(state.clone())?;
            }
        }
        Ok(())
    }

    /// Reset every registered app back to its construction-time state.
    pub fn reset_all(&self) {
        for app in self.apps.values() {
            app.reset();
        }
    }

    /// Invoke `app_name.function_name(args)`, recording it as a captured
    /// event if a [`crate::CaptureScope`] is currently open.
    pub fn invoke(
        &self,
        app_name: &str,
        function_name: &str,
        args: &IndexMap<String, Value>,
    ) -> Result<Value, RegistryError> {
        let app = self.apps.get(app_name).ok_or_else(|| RegistryError::UnknownApp(app_name.to_string()))?;
        let app = Arc::clone(app);
        let function_name_owned = function_name.to_string();
        let args_owned = args.clone();

        tracing::debug!(app = app_name, function = function_name, "invoking tool");

        EventRegisterer::record(app_name, function_name, args, move || {
            app.call(&function_name_owned, &args_owned)
        })
        .map_err(RegistryError::from)
    }

    /// Author an [`Action`] against `app_name.function_name` without
    /// executing it: runs the call under
    /// [`EventRegisterer::with_capture_mode`] so `invoke` never touches
    /// live app state, then returns an `Action` describing the intended
    /// call. Scenario authoring uses this in place of hand-building an
    /// `Action` literal, e.g. `registry.capture("Calendar", "create_event", args)?.with_operation_type(...)`.
    pub fn capture(
        &self,
        app_name: &str,
        function_name: &str,
        args: IndexMap<String, Value>,
    ) -> Result<Action, RegistryError> {
        let app = self.apps.get(app_name).ok_or_else(|| RegistryError::UnknownApp(app_name.to_string()))?;
        let spec = app.tool_spec(function_name).ok_or_else(|| {
            RegistryError::App(AppError::UnknownFunction { app: app_name.to_string(), function: function_name.to_string() })
        })?;

        EventRegisterer::with_capture_mode(|| {
            let _ = self.invoke(app_name, function_name, &args);
        });

        Ok(Action::new(app_name, function_name).with_operation_type(spec.operation_type).with_args(args))
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
