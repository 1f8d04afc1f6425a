// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The conversation surface: `send_message_to_user` and
//! `send_message_to_agent` are the two function names the scenario
//! validator looks for when it walks the DAG to find the single
//! USER<->AGENT conversation branch (I5/I6).

use are_core::OperationType;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::app::{App, AppError, ToolSpec};

pub const SEND_MESSAGE_TO_USER: &str = "send_message_to_user";
pub const SEND_MESSAGE_TO_AGENT: &str = "send_message_to_agent";

#[derive(Default)]
pub struct AgentUserInterfaceApp {
    transcript: Mutex<Vec<Value>>,
}

impl AgentUserInterfaceApp {
    pub fn new() -> Self {
        Self::default()
    }

    fn append(&self, direction: &str, args: &IndexMap<String, Value>) -> Value {
        let entry = json!({ "direction": direction, "content": args.get("content").cloned().unwrap_or(Value::Null) });
        self.transcript.lock().push(entry.clone());
        entry
    }
}

impl App for AgentUserInterfaceApp {
    fn name(&self) -> &str {
        "AgentUserInterface"
    }

    fn tools(&self) -> Vec<ToolSpec> {
        vec![
            ToolSpec::new(SEND_MESSAGE_TO_USER, OperationType::Write, "sends a message from the agent to the user"),
            ToolSpec::new(SEND_MESSAGE_TO_AGENT, OperationType::Write, "sends a message from the user to the agent"),
            ToolSpec::new("get_transcript", OperationType::Read, "returns the full conversation so far"),
        ]
    }

    fn call(&self, function_name: &str, args: &IndexMap<String, Value>) -> Result<Value, AppError> {
        match function_name {
            SEND_MESSAGE_TO_USER => Ok(self.append("agent_to_user", args)),
            SEND_MESSAGE_TO_AGENT => Ok(self.append("user_to_agent", args)),
            "get_transcript" => Ok(json!(*self.transcript.lock())),
            other => Err(AppError::UnknownFunction { app: self.name().to_string(), function: other.to_string() }),
        }
    }

    fn state(&self) -> Value {
        json!({ "transcript": *self.transcript.lock() })
    }

    fn load_state(&self, state: Value) -> Result<(), AppError> {
        let transcript = state.get("transcript").cloned().unwrap_or_else(|| json!([]));
        let transcript: Vec<Value> = serde_json::from_value(transcript).map_err(|e| AppError::Failed {
            app: self.name().to_string(),
            function: "load_state".to_string(),
            message: e.to_string(),
        })?;
        *self.transcript.lock() = transcript;
        Ok(())
    }

    fn reset(&self) {
        self.transcript.lock().clear();
    }
}

#[cfg(test)]
#[path = "messaging_tests.rs"]
mod tests;
