// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Demo scenarios bundled with the binary so `are run <name>` is usable
//! without a scenario file. These are fixtures, not the engine's subject
//! matter — concrete scenarios live outside the engine itself.

mod extra_message;
mod find_image;

use are_scenario::Scenario;
use std::sync::Arc;

pub fn all() -> Vec<Arc<dyn Scenario>> {
    vec![Arc::new(find_image::FindImageScenario), Arc::new(extra_message::ExtraMessageScenario)]
}

pub fn find(name: &str) -> Option<Arc<dyn Scenario>> {
    all().into_iter().find(|s| s.name() == name)
}
