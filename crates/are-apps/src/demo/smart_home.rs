// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lights, a thermostat, a door lock, a camera. Exists to drive
//! validation-event scenarios with no structural oracle: success is
//! judged purely on milestones read back from app state.

use are_core::OperationType;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::app::{App, AppError, ToolSpec};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct HomeState {
    lights: BTreeMap<String, bool>,
    thermostat_f: f64,
    door_locked: bool,
    camera_recording: bool,
}

impl Default for HomeState {
    fn default() -> Self {
        Self { lights: BTreeMap::new(), thermostat_f: 70.0, door_locked: true, camera_recording: true }
    }
}

#[derive(Default)]
pub struct SmartHomeApp {
    state: Mutex<HomeState>,
}

impl SmartHomeApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_light(&self, name: impl Into<String>, on: bool) {
        self.state.lock().lights.insert(name.into(), on);
    }

    pub fn any_light_off(&self) -> bool {
        self.state.lock().lights.values().any(|&on| !on)
    }

    pub fn thermostat_f(&self) -> f64 {
        self.state.lock().thermostat_f
    }

    pub fn door_locked(&self) -> bool {
        self.state.lock().door_locked
    }

    pub fn camera_recording(&self) -> bool {
        self.state.lock().camera_recording
    }
}

impl App for SmartHomeApp {
    fn name(&self) -> &str {
        "SmartHome"
    }

    fn tools(&self) -> Vec<ToolSpec> {
        vec![
            ToolSpec::new("set_light", OperationType::Write, "turns a light on or off"),
            ToolSpec::new("set_thermostat", OperationType::Write, "sets the thermostat target in Fahrenheit"),
            ToolSpec::new("set_door_lock", OperationType::Write, "locks or unlocks the front door"),
            ToolSpec::new("set_camera_recording", OperationType::Write, "turns the camera's recording on or off"),
            ToolSpec::new("get_status", OperationType::Read, "reads the full home status"),
        ]
    }

    fn call(&self, function_name: &str, args: &IndexMap<String, Value>) -> Result<Value, AppError> {
        match function_name {
            "set_light" => {
                let name = args.get("name").and_then(Value::as_str).ok_or_else(|| AppError::InvalidArgument {
                    app: self.name().to_string(),
                    function: function_name.to_string(),
                    message: "missing string argument \"name\"".to_string(),
                })?;
                let on = args.get("on").and_then(Value::as_bool).unwrap_or(false);
                self.state.lock().lights.insert(name.to_string(), on);
                Ok(Value::Null)
            }
            "set_thermostat" => {
                let target_f = args.get("target_f").and_then(Value::as_f64).ok_or_else(|| AppError::InvalidArgument {
                    app: self.name().to_string(),
                    function: function_name.to_string(),
                    message: "missing numeric argument \"target_f\"".to_string(),
                })?;
                self.state.lock().thermostat_f = target_f;
                Ok(Value::Null)
            }
            "set_door_lock" => {
                let locked = args.get("locked").and_then(Value::as_bool).unwrap_or(true);
                self.state.lock().door_locked = locked;
                Ok(Value::Null)
            }
            "set_camera_recording" => {
                let recording = args.get("recording").and_then(Value::as_bool).unwrap_or(true);
                self.state.lock().camera_recording = recording;
                Ok(Value::Null)
            }
            "get_status" => {
                let s = self.state.lock();
                Ok(json!({
                    "lights": s.lights,
                    "thermostat_f": s.thermostat_f,
                    "door_locked": s.door_locked,
                    "camera_recording": s.camera_recording,
                }))
            }
            other => Err(AppError::UnknownFunction { app: self.name().to_string(), function: other.to_string() }),
        }
    }

    fn state(&self) -> Value {
        let s = self.state.lock();
        json!({
            "lights": s.lights,
            "thermostat_f": s.thermostat_f,
            "door_locked": s.door_locked,
            "camera_recording": s.camera_recording,
        })
    }

    fn load_state(&self, state: Value) -> Result<(), AppError> {
        let parsed: HomeState = serde_json::from_value(state).map_err(|e| AppError::Failed {
            app: self.name().to_string(),
            function: "load_state".to_string(),
            message: e.to_string(),
        })?;
        *self.state.lock() = parsed;
        Ok(())
    }

    fn reset(&self) {
        *self.state.lock() = HomeState::default();
    }
}

#[cfg(test)]
#[path = "smart_home_tests.rs"]
mod tests;
