// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment configuration and tool-call augmentation.

/// Top-level environment settings.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentConfig {
    /// Virtual time the simulation starts at.
    pub start_time: f64,
    /// Number of time units a CONDITION/VALIDATION re-poll advances by.
    pub tick_duration: f64,
    /// Hard cap on ticks, guarding against a scenario with no STOP event.
    pub max_ticks: u32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self { start_time: 0.0, tick_duration: 1.0, max_ticks: 10_000 }
    }
}

/// Simulates real-world tool imperfection: added latency and occasional
/// failure, independent of what the app itself does.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolAugmentationConfig {
    pub extra_latency: f64,
    pub failure_probability: f64,
}

impl ToolAugmentationConfig {
    pub fn new(extra_latency: f64, failure_probability: f64) -> Self {
        Self { extra_latency, failure_probability: failure_probability.clamp(0.0, 1.0) }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn sample_latency(&self, rng: &mut impl rand::Rng) -> f64 {
        if self.extra_latency <= 0.0 {
            return 0.0;
        }
        rng.gen_range(0.0..=self.extra_latency)
    }

    pub fn should_fail(&self, rng: &mut impl rand::Rng) -> bool {
        self.failure_probability > 0.0 && rng.gen_bool(self.failure_probability)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
