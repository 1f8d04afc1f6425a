// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Virtual clock abstraction for the simulation's time manager.
//!
//! Unlike a wall-clock, the simulator's clock only moves when explicitly
//! told to (`advance`). It is read from many places (apps, the judge) but
//! written from exactly one place: the environment's event loop.

use parking_lot::Mutex;
use std::sync::Arc;

/// Owns the virtual clock. Reads are lock-free-ish (a single mutex guard);
/// writes only ever happen on the environment's loop thread.
#[derive(Clone, Default)]
pub struct TimeManager {
    now: Arc<Mutex<f64>>,
}

impl TimeManager {
    pub fn new(start_time: f64) -> Self {
        Self { now: Arc::new(Mutex::new(start_time)) }
    }

    /// Current virtual time, in seconds since scenario start.
    pub fn time(&self) -> f64 {
        *self.now.lock()
    }

    /// Advance the clock by `delta` seconds. `delta` must be strictly positive.
    pub fn advance(&self, delta: f64) {
        debug_assert!(delta > 0.0, "time increment must be positive, got {delta}");
        *self.now.lock() += delta;
    }

    /// Reset the clock to `t0`, discarding prior progress.
    pub fn reset(&self, t0: f64) {
        *self.now.lock() = t0;
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
