// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The event loop: pops the next ready event off the queue, advances the
//! virtual clock to its time, executes it, and appends the outcome to the
//! log.

use are_apps::{CaptureScope, RegistryError, ToolRegistry};
use are_core::{
    resolve_placeholders, CompletedEvent, Event, EventId, EventMetadata, EnvironmentView, LoopError, TimeManager,
};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::config::{EnvironmentConfig, ToolAugmentationConfig};
use crate::event_log::EventLog;
use crate::event_queue::EventQueue;
use crate::state::EnvironmentState;

/// What happened on one call to [`Environment::tick`].
#[derive(Debug, Clone)]
pub enum TickOutcome {
    /// An event executed; the loop should keep going.
    Executed(EventId),
    /// A STOP event executed; the run is over.
    Stopped,
    /// Nothing left to run.
    QueueEmpty,
}

/// A point-in-time capture of every app's state, the virtual clock, and
/// the event log, for save/restore across runs. Serializing the snapshot
/// itself to disk is left to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    pub apps: HashMap<String, Value>,
    pub time: f64,
    pub log: Vec<CompletedEvent>,
}

/// Owns every piece of mutable simulation state: the clock, the event
/// queue and log, the app registry, and the run state. `Send + Sync` so a
/// scenario runner can share one across threads (e.g. a timeout watchdog).
pub struct Environment {
    time: TimeManager,
    queue: Mutex<EventQueue>,
    log: Mutex<EventLog>,
    registry: ToolRegistry,
    state: Mutex<EnvironmentState>,
    config: EnvironmentConfig,
    augmentation: ToolAugmentationConfig,
    rng: Mutex<StdRng>,
}

impl Environment {
    pub fn new(config: EnvironmentConfig, augmentation: ToolAugmentationConfig, registry: ToolRegistry) -> Self {
        Self {
            time: TimeManager::new(config.start_time),
            queue: Mutex::new(EventQueue::new(config.start_time)),
            log: Mutex::new(EventLog::new()),
            registry,
            state: Mutex::new(EnvironmentState::NotStarted),
            config,
            augmentation,
            rng: Mutex::new(StdRng::seed_from_u64(0)),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn schedule(&self, event: Event) {
        self.queue.lock().schedule(event);
    }

    /// Capture every app's state, the virtual clock, and the log so far.
    /// Does not capture the event queue: a snapshot is meant to be taken
    /// between runs (e.g. after `run_until_stop`), not mid-flight with
    /// events still pending.
    pub fn snapshot(&self) -> EnvironmentSnapshot {
        let apps = match self.registry.state_snapshot() {
            Value::Object(map) => map.into_iter().collect(),
            _ => HashMap::new(),
        };
        EnvironmentSnapshot { apps, time: self.time.time(), log: self.log_entries() }
    }

    /// Restore every app's state, the virtual clock, and the log from a
    /// prior [`Environment::snapshot`]. The event queue is left untouched.
    pub fn restore(&self, snapshot: EnvironmentSnapshot) -> Result<(), RegistryError> {
        self.registry.load_state_snapshot(&snapshot.apps)?;
        self.time.reset(snapshot.time);
        self.log.lock().restore(snapshot.log);
        Ok(())
    }

    pub fn state(&self) -> EnvironmentState {
        self.state.lock().clone()
    }

    pub fn log_entries(&self) -> Vec<CompletedEvent> {
        self.log.lock().entries().to_vec()
    }

    /// Suspend ticking without discarding queue or log state. A paused
    /// environment can be resumed; `tick` becomes a no-op while paused.
    pub fn pause(&self) {
        let mut state = self.state.lock();
        if *state == EnvironmentState::Running {
            *state = EnvironmentState::Paused;
        }
    }

    pub fn resume(&self) {
        let mut state = self.state.lock();
        if *state == EnvironmentState::Paused {
            *state = EnvironmentState::Running;
        }
    }

    /// Caller-initiated early exit, distinct from the queue running dry
    /// on its own (`Completed`).
    pub fn stop(&self) {
        let mut state = self.state.lock();
        if !state.is_terminal() {
            *state = EnvironmentState::Stopped;
        }
    }

    /// Run one step of the event loop.
    pub fn tick(&self) -> Result<TickOutcome, LoopError> {
        {
            let mut state = self.state.lock();
            if state.is_terminal() || *state == EnvironmentState::Paused {
                return Ok(TickOutcome::QueueEmpty);
            }
            if *state == EnvironmentState::NotStarted {
                *state = EnvironmentState::Running;
            }
        }

        let event = match self.queue.lock().pop_ready() {
            Some(event) => event,
            None => {
                *self.state.lock() = EnvironmentState::Completed;
                return Ok(TickOutcome::QueueEmpty);
            }
        };

        let event_time = event.event_time().unwrap_or_else(|| self.time.time());
        if event_time > self.time.time() {
            self.time.advance(event_time - self.time.time());
        }

        tracing::debug!(event_id = %event.id(), event_type = %event.event_type(), time = event_time, "executing event");

        match event {
            Event::User(action_event) => self.execute_and_complete(are_core::EventType::User, action_event),
            Event::Env(action_event) => self.execute_and_complete(are_core::EventType::Env, action_event),
            Event::Agent(action_event) => self.execute_and_complete(are_core::EventType::Agent, action_event),
            Event::Condition(mut condition) => {
                let satisfied = condition.poll(self);
                let event_id = condition.meta.event_id.clone();
                if satisfied {
                    let metadata = EventMetadata::success(self.time.time(), json!(true));
                    self.complete(event_id.clone(), are_core::EventType::Condition, None, metadata)?;
                } else if condition.has_timed_out() {
                    let metadata = EventMetadata::failure(self.time.time(), "condition timed out");
                    self.append_log(event_id.clone(), are_core::EventType::Condition, None, metadata);
                    return Err(LoopError::ConditionTimeout(event_id, condition.check_count));
                } else {
                    let metadata = EventMetadata::in_progress(self.time.time());
                    self.append_log(event_id.clone(), are_core::EventType::Condition, None, metadata);
                    let next_time = self.time.time() + f64::from(condition.schedule_every_ticks) * self.config.tick_duration;
                    let next_check = condition.next_check(next_time);
                    self.queue.lock().reschedule_renamed(&event_id, next_check);
                }
                Ok(TickOutcome::Executed(event_id))
            }
            Event::Validation(mut validation) => {
                let event_id = validation.meta.event_id.clone();
                if let Some(minefield) = validation.poll(self) {
                    let metadata = EventMetadata::failure(self.time.time(), format!("minefield {minefield} triggered"));
                    self.append_log(event_id.clone(), are_core::EventType::Validation, None, metadata);
                    return Err(LoopError::MinefieldTriggered(event_id, minefield));
                }
                if validation.is_complete() {
                    let metadata = EventMetadata::success(self.time.time(), json!(validation.achieved));
                    self.complete(event_id.clone(), are_core::EventType::Validation, None, metadata)?;
                } else if validation.has_timed_out() {
                    let unachieved = validation.unachieved_milestones();
                    let metadata = EventMetadata::failure(self.time.time(), "validation timed out");
                    self.append_log(event_id.clone(), are_core::EventType::Validation, None, metadata);
                    return Err(LoopError::ValidationTimeout(event_id, unachieved));
                } else {
                    let metadata = EventMetadata::in_progress(self.time.time());
                    self.append_log(event_id.clone(), are_core::EventType::Validation, None, metadata);
                    let next_time = self.time.time() + self.config.tick_duration;
                    self.queue.lock().reschedule_at(Event::Validation(validation), next_time);
                }
                Ok(TickOutcome::Executed(event_id))
            }
            Event::Stop(meta) => {
                let event_id = meta.event_id.clone();
                let metadata = EventMetadata::success(self.time.time(), Value::Null);
                self.complete(event_id, are_core::EventType::Stop, None, metadata)?;
                *self.state.lock() = EnvironmentState::Completed;
                Ok(TickOutcome::Stopped)
            }
        }
    }

    /// Run ticks until the environment reaches a terminal state or the
    /// configured tick cap is hit.
    pub fn run_until_stop(&self) -> Result<(), LoopError> {
        for _ in 0..self.config.max_ticks {
            match self.tick() {
                Ok(TickOutcome::Stopped) | Ok(TickOutcome::QueueEmpty) => return Ok(()),
                Ok(TickOutcome::Executed(_)) => continue,
                Err(err) => {
                    *self.state.lock() = EnvironmentState::Failed(err.to_string());
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    fn execute_and_complete(
        &self,
        event_type: are_core::EventType,
        action_event: are_core::ActionEvent,
    ) -> Result<TickOutcome, LoopError> {
        let event_id = action_event.meta.event_id.clone();
        let metadata = self.execute_action(&action_event);
        self.complete(event_id.clone(), event_type, action_event.action, metadata)?;
        Ok(TickOutcome::Executed(event_id))
    }

    fn execute_action(&self, action_event: &are_core::ActionEvent) -> EventMetadata {
        let Some(action) = &action_event.action else {
            return EventMetadata::success(self.time.time(), Value::Null);
        };

        if self.augmentation.failure_probability > 0.0 {
            let mut rng = self.rng.lock();
            if self.augmentation.should_fail(&mut rng) {
                return EventMetadata::failure(self.time.time(), "simulated tool failure");
            }
            let latency = self.augmentation.sample_latency(&mut rng);
            drop(rng);
            if latency > 0.0 {
                self.time.advance(latency);
            }
        }

        let resolved_args = resolve_placeholders(&action.args, &self.log.lock().return_values());

        let scope = CaptureScope::open();
        let result = self.registry.invoke(&action.app_name, &action.function_name, &resolved_args);
        let _ = scope.end();

        match result {
            Ok(value) => EventMetadata::success(self.time.time(), value),
            Err(err) => EventMetadata::failure(self.time.time(), err.to_string()),
        }
    }

    /// Append an outcome to the log without resolving the event's
    /// dependents. Used for a CONDITION/VALIDATION poll that hasn't
    /// succeeded yet: the poll is worth recording, but nothing downstream
    /// may unblock until the check actually passes (or times out, which
    /// aborts the run rather than resolving anything).
    fn append_log(&self, event_id: EventId, event_type: are_core::EventType, action: Option<are_core::Action>, metadata: EventMetadata) {
        self.log.lock().append(CompletedEvent::new(event_id, event_type, action, metadata));
    }

    fn complete(
        &self,
        event_id: EventId,
        event_type: are_core::EventType,
        action: Option<are_core::Action>,
        metadata: EventMetadata,
    ) -> Result<(), LoopError> {
        let time = metadata.completion_time;
        // Successors are scheduled only if the event did not fail; a failed
        // action must not unblock anything depending on it.
        if metadata.is_success() {
            self.queue.lock().mark_resolved(event_id.clone(), time);
        }
        self.append_log(event_id, event_type, action, metadata);
        Ok(())
    }
}

impl EnvironmentView for Environment {
    fn time(&self) -> f64 {
        self.time.time()
    }

    fn app_state(&self, app_name: &str) -> Option<Value> {
        self.registry.app_state(app_name)
    }
}

#[cfg(test)]
#[path = "environment_tests.rs"]
mod tests;
