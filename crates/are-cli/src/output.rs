// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The structured JSON result printed to stdout (or `--output`).

use are_core::CompletedEvent;
use are_judge::Judgment;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RunResult {
    pub scenario: String,
    pub success: bool,
    pub wall_clock_seconds: f64,
    pub virtual_time_span: f64,
    pub log: Vec<CompletedEvent>,
    pub judgment: Judgment,
}
