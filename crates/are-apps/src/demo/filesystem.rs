// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A sandboxed in-memory filesystem: no real paths ever touched.

use are_core::OperationType;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::app::{App, AppError, ToolSpec};

#[derive(Default)]
pub struct SandboxFilesystemApp {
    files: Mutex<BTreeMap<String, String>>,
}

impl SandboxFilesystemApp {
    pub fn new() -> Self {
        Self::default()
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

impl App for SandboxFilesystemApp {
    fn name(&self) -> &str {
        "SandboxFilesystem"
    }

    fn tools(&self) -> Vec<ToolSpec> {
        vec![
            ToolSpec::new("write_file", OperationType::Write, "writes a file's full content"),
            ToolSpec::new("read_file", OperationType::Read, "reads a file's content"),
            ToolSpec::new("delete_file", OperationType::Write, "deletes a file"),
            ToolSpec::new("list_files", OperationType::Read, "lists every file path"),
        ]
    }

    fn call(&self, function_name: &str, args: &IndexMap<String, Value>) -> Result<Value, AppError> {
        match function_name {
            "write_file" => {
                let path = self.arg_str(function_name, args, "path")?.to_string();
                let content = self.arg_str(function_name, args, "content")?.to_string();
                self.files.lock().insert(path, content);
                Ok(Value::Null)
            }
            "read_file" => {
                let path = self.arg_str(function_name, args, "path")?;
                self.files.lock().get(path).cloned().map(Value::String).ok_or_else(|| AppError::Failed {
                    app: self.name().to_string(),
                    function: function_name.to_string(),
                    message: format!("no such file {path:?}"),
                })
            }
            "delete_file" => {
                let path = self.arg_str(function_name, args, "path")?;
                self.files.lock().remove(path);
                Ok(Value::Null)
            }
            "list_files" => Ok(json!(self.files.lock().keys().cloned().collect::<Vec<_>>())),
            other => Err(AppError::UnknownFunction { app: self.name().to_string(), function: other.to_string() }),
        }
    }

    fn state(&self) -> Value {
        json!({ "files": *self.files.lock() })
    }

    fn load_state(&self, state: Value) -> Result<(), AppError> {
        let files = state.get("files").cloned().unwrap_or_else(|| json!({}));
        let files: BTreeMap<String, String> = serde_json::from_value(files).map_err(|e| AppError::Failed {
            app: self.name().to_string(),
            function: "load_state".to_string(),
            message: e.to_string(),
        })?;
        *self.files.lock() = files;
        Ok(())
    }

    fn reset(&self) {
        self.files.lock().clear();
    }
}

#[cfg(test)]
#[path = "filesystem_tests.rs"]
mod tests;
