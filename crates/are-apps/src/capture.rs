// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event capture: turns a tool call into at most one appended event.
//!
//! A tool implementation is free to call other tools on other apps while
//! it runs (e.g. a "book trip" tool calling the calendar app and the
//! messaging app internally). Only the outermost call should ever be
//! recorded — otherwise the event log would gain phantom entries for
//! implementation details the scenario author never asked about. The
//! `registration_active` flag enforces that: exactly one capture per
//! top-level `ToolRegistry::invoke`, regardless of call depth.
//!
//! Capture mode is a second, orthogonal flag: while it's on, `record`
//! never calls into the app at all. It only exists so scenario authoring
//! can describe a tool call ("the agent will call `send_email`") without
//! actually running it against live app state.

use indexmap::IndexMap;
use serde_json::Value;
use std::cell::{Cell, RefCell};

use crate::app::AppError;

/// One recorded tool invocation and its outcome.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub app_name: String,
    pub function_name: String,
    pub args: IndexMap<String, Value>,
    pub result: Result<Value, AppError>,
}

struct CaptureState {
    events: Vec<CapturedCall>,
    registration_active: bool,
}

thread_local! {
    static CAPTURE: RefCell<Option<CaptureState>> = const { RefCell::new(None) };
    static CAPTURE_MODE: Cell<bool> = const { Cell::new(false) };
}

/// Coordinates capture of tool calls into the currently-open [`CaptureScope`].
pub struct EventRegisterer;

impl EventRegisterer {
    pub fn is_capturing() -> bool {
        CAPTURE.with(|c| c.borrow().is_some())
    }

    /// Run `f` with capture mode on: every [`EventRegisterer::record`]
    /// call underneath it is recorded but never actually invoked against
    /// app state. Nests correctly with itself.
    pub fn with_capture_mode<R>(f: impl FnOnce() -> R) -> R {
        let previous = CAPTURE_MODE.with(|c| c.replace(true));
        let result = f();
        CAPTURE_MODE.with(|c| c.set(previous));
        result
    }

    pub fn is_capture_mode() -> bool {
        CAPTURE_MODE.with(Cell::get)
    }

    pub fn is_registration_active() -> bool {
        CAPTURE.with(|c| matches!(c.borrow().as_ref(), Some(state) if state.registration_active))
    }

    /// Run `f` with nested recording suppressed, regardless of whether a
    /// capture scope is open. Used by callers that invoke an app method
    /// directly and don't want it mistaken for a nested tool call.
    pub fn with_registration_disabled<R>(f: impl FnOnce() -> R) -> R {
        let previous = CAPTURE.with(|c| match c.borrow_mut().as_mut() {
            Some(state) => Some(std::mem::replace(&mut state.registration_active, true)),
            None => None,
        });
        let result = f();
        if let Some(previous) = previous {
            CAPTURE.with(|c| {
                if let Some(state) = c.borrow_mut().as_mut() {
                    state.registration_active = previous;
                }
            });
        }
        result
    }

    /// Run `call`, recording it as a single event if this is the
    /// outermost invocation of a capture scope. Reentrant calls (a tool
    /// calling another tool) run `call` without appending a second event.
    ///
    /// Under [`EventRegisterer::with_capture_mode`], `call` is never
    /// invoked: the call is recorded as-is and `Ok(Value::Null)` is
    /// returned in its place.
    pub fn record(
        app_name: &str,
        function_name: &str,
        args: &IndexMap<String, Value>,
        call: impl FnOnce() -> Result<Value, AppError>,
    ) -> Result<Value, AppError> {
        if Self::is_capture_mode() {
            CAPTURE.with(|c| {
                if let Some(state) = c.borrow_mut().as_mut() {
                    state.events.push(CapturedCall {
                        app_name: app_name.to_string(),
                        function_name: function_name.to_string(),
                        args: args.clone(),
                        result: Ok(Value::Null),
                    });
                }
            });
            return Ok(Value::Null);
        }

        let already_active = CAPTURE.with(|c| match c.borrow().as_ref() {
            Some(state) => state.registration_active,
            None => false,
        });

        if already_active {
            return call();
        }

        CAPTURE.with(|c| {
            if let Some(state) = c.borrow_mut().as_mut() {
                state.registration_active = true;
            }
        });

        let result = call();

        CAPTURE.with(|c| {
            if let Some(state) = c.borrow_mut().as_mut() {
                state.registration_active = false;
                state.events.push(CapturedCall {
                    app_name: app_name.to_string(),
                    function_name: function_name.to_string(),
                    args: args.clone(),
                    result: result.clone(),
                });
            }
        });

        result
    }
}

/// RAII guard around a capture window. Dropping it without calling
/// [`CaptureScope::end`] discards anything captured so far.
pub struct CaptureScope {
    _private: (),
}

impl CaptureScope {
    pub fn open() -> Self {
        CAPTURE.with(|c| {
            *c.borrow_mut() = Some(CaptureState { events: Vec::new(), registration_active: false });
        });
        Self { _private: () }
    }

    /// Close the scope, returning whatever was captured in it.
    pub fn end(self) -> Vec<CapturedCall> {
        CAPTURE.with(|c| c.borrow_mut().take()).map(|s| s.events).unwrap_or_default()
    }
}

impl Drop for CaptureScope {
    fn drop(&mut self) {
        CAPTURE.with(|c| {
            *c.borrow_mut() = None;
        });
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
