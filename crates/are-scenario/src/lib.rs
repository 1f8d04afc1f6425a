// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! are-scenario: the scenario author's DAG builder, invariant validator,
//! and turn-time rule, plus the serialized scenario wire format.

pub mod builder;
mod graph;
pub mod scenario;
pub mod serialize;
pub mod turn;
pub mod validate;

pub use builder::ScenarioBuilder;
pub use scenario::{Scenario, ValidationResult};
pub use serialize::ScenarioFile;
pub use turn::{recompute_turn_idx, TurnIdx};
pub use validate::validate_dag;
