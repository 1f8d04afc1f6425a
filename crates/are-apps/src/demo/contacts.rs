// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An address book keyed by contact name.

use are_core::OperationType;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::app::{App, AppError, ToolSpec};

#[derive(Default)]
pub struct ContactsApp {
    contacts: Mutex<BTreeMap<String, Value>>,
}

impl ContactsApp {
    pub fn new() -> Self {
        Self::default()
    }
}

impl App for ContactsApp {
    fn name(&self) -> &str {
        "Contacts"
    }

    fn tools(&self) -> Vec<ToolSpec> {
        vec![
            ToolSpec::new("add_contact", OperationType::Write, "adds or replaces a contact"),
            ToolSpec::new("get_contact", OperationType::Read, "looks up a contact by name"),
            ToolSpec::new("list_contacts", OperationType::Read, "lists every contact name"),
        ]
    }

    fn call(&self, function_name: &str, args: &IndexMap<String, Value>) -> Result<Value, AppError> {
        match function_name {
            "add_contact" => {
                let name = args.get("name").and_then(Value::as_str).ok_or_else(|| AppError::InvalidArgument {
                    app: self.name().to_string(),
                    function: function_name.to_string(),
                    message: "missing string argument \"name\"".to_string(),
                })?;
                let mut contacts = self.contacts.lock();
                contacts.insert(name.to_string(), json!(args.clone()));
                Ok(Value::Null)
            }
            "get_contact" => {
                let name = args.get("name").and_then(Value::as_str).unwrap_or_default();
                self.contacts.lock().get(name).cloned().ok_or_else(|| AppError::Failed {
                    app: self.name().to_string(),
                    function: function_name.to_string(),
                    message: format!("no such contact {name:?}"),
                })
            }
            "list_contacts" => Ok(json!(self.contacts.lock().keys().cloned().collect::<Vec<_>>())),
            other => Err(AppError::UnknownFunction { app: self.name().to_string(), function: other.to_string() }),
        }
    }

    fn state(&self) -> Value {
        json!({ "contacts": *self.contacts.lock() })
    }

    fn load_state(&self, state: Value) -> Result<(), AppError> {
        let contacts = state.get("contacts").cloned().unwrap_or_else(|| json!({}));
        let contacts: BTreeMap<String, Value> = serde_json::from_value(contacts).map_err(|e| AppError::Failed {
            app: self.name().to_string(),
            function: "load_state".to_string(),
            message: e.to_string(),
        })?;
        *self.contacts.lock() = contacts;
        Ok(())
    }

    fn reset(&self) {
        self.contacts.lock().clear();
    }
}

#[cfg(test)]
#[path = "contacts_tests.rs"]
mod tests;
