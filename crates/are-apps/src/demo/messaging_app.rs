// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An email inbox: messages arrive with an id, can be forwarded to new
//! recipients or replied to. Drives scenarios that hinge on an event
//! arriving mid-conversation and the agent acting on it by id.

use are_core::OperationType;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::app::{App, AppError, ToolSpec};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Email {
    sender: String,
    subject: String,
    body: String,
    attachment: Option<String>,
}

#[derive(Default)]
pub struct MessagingApp {
    inbox: Mutex<BTreeMap<String, Email>>,
    sent: Mutex<Vec<Value>>,
}

impl MessagingApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scenario-authoring helper: deliver an email before the run starts,
    /// bypassing the tool-call surface (no agent should be credited with
    /// having "received" mail the environment injected).
    pub fn deliver(&self, email_id: impl Into<String>, sender: impl Into<String>, subject: impl Into<String>, body: impl Into<String>, attachment: Option<String>) {
        self.inbox.lock().insert(email_id.into(), Email { sender: sender.into(), subject: subject.into(), body: body.into(), attachment });
    }

    fn arg_str<'a>(&self, function: &str, args: &'a IndexMap<String, Value>, name: &str) -> Result<&'a str, AppError> {
        args.get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::InvalidArgument {
                app: self.name().to_string(),
                function: function.to_string(),
                message: format!("missing string argument {name:?}"),
            })
    }
}

impl App for MessagingApp {
    fn name(&self) -> &str {
        "Messaging"
    }

    fn tools(&self) -> Vec<ToolSpec> {
        vec![
            ToolSpec::new("forward_email", OperationType::Write, "forwards an email by id to new recipients"),
            ToolSpec::new("reply_to_email", OperationType::Write, "replies to an email by id"),
            ToolSpec::new("get_email", OperationType::Read, "reads an email by id"),
            ToolSpec::new("list_inbox", OperationType::Read, "lists every email id in the inbox"),
        ]
    }

    fn call(&self, function_name: &str, args: &IndexMap<String, Value>) -> Result<Value, AppError> {
        match function_name {
            "forward_email" => {
                let email_id = self.arg_str(function_name, args, "email_id")?;
                let recipients = args.get("recipients").cloned().unwrap_or(Value::Array(vec![]));
                let inbox = self.inbox.lock();
                let email = inbox.get(email_id).ok_or_else(|| AppError::Failed {
                    app: self.name().to_string(),
                    function: function_name.to_string(),
                    message: format!("no such email {email_id:?}"),
                })?;
                let entry = json!({
                    "email_id": email_id,
                    "recipients": recipients,
                    "subject": email.subject,
                    "attachment": email.attachment,
                });
                drop(inbox);
                self.sent.lock().push(entry.clone());
                Ok(entry)
            }
            "reply_to_email" => {
                let email_id = self.arg_str(function_name, args, "email_id")?;
                let content = self.arg_str(function_name, args, "content")?;
                if !self.inbox.lock().contains_key(email_id) {
                    return Err(AppError::Failed {
                        app: self.name().to_string(),
                        function: function_name.to_string(),
                        message: format!("no such email {email_id:?}"),
                    });
                }
                let entry = json!({ "email_id": email_id, "content": content });
                self.sent.lock().push(entry.clone());
                Ok(entry)
            }
            "get_email" => {
                let email_id = self.arg_str(function_name, args, "email_id")?;
                let inbox = self.inbox.lock();
                let email = inbox.get(email_id).ok_or_else(|| AppError::Failed {
                    app: self.name().to_string(),
                    function: function_name.to_string(),
                    message: format!("no such email {email_id:?}"),
                })?;
                Ok(json!({
                    "email_id": email_id,
                    "sender": email.sender,
                    "subject": email.subject,
                    "body": email.body,
                    "attachment": email.attachment,
                }))
            }
            "list_inbox" => Ok(json!(self.inbox.lock().keys().cloned().collect::<Vec<_>>())),
            other => Err(AppError::UnknownFunction { app: self.name().to_string(), function: other.to_string() }),
        }
    }

    fn state(&self) -> Value {
        let inbox: BTreeMap<String, Value> = self
            .inbox
            .lock()
            .iter()
            .map(|(id, e)| (id.clone(), json!({"sender": e.sender, "subject": e.subject, "body": e.body, "attachment": e.attachment})))
            .collect();
        json!({ "inbox": inbox, "sent": *self.sent.lock() })
    }

    fn load_state(&self, state: Value) -> Result<(), AppError> {
        let to_err = |e: serde_json::Error| AppError::Failed {
            app: self.name().to_string(),
            function: "load_state".to_string(),
            message: e.to_string(),
        };
        let inbox = state.get("inbox").cloned().unwrap_or_else(|| json!({}));
        let inbox: BTreeMap<String, Email> = serde_json::from_value(inbox).map_err(to_err)?;
        let sent = state.get("sent").cloned().unwrap_or_else(|| json!([]));
        let sent: Vec<Value> = serde_json::from_value(sent).map_err(to_err)?;
        *self.inbox.lock() = inbox;
        *self.sent.lock() = sent;
        Ok(())
    }

    fn reset(&self) {
        self.inbox.lock().clear();
        self.sent.lock().clear();
    }
}

#[cfg(test)]
#[path = "messaging_app_tests.rs"]
mod tests;
