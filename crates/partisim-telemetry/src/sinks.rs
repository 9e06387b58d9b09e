//! Pluggable event sinks.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::events::{EventKind, SimulationEvent};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the simulation ends.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Captures events in memory.
///
/// The buffer is shared, so a clone kept by the caller can read what the
/// boxed copy registered on the bus received.
#[derive(Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event received so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        self.lock().clone()
    }

    /// Number of events received so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing was received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A panic in another holder must not discard what was recorded.
    fn lock(&self) -> MutexGuard<'_, Vec<SimulationEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.lock().push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through `tracing`.
///
/// Factorization failures are logged at `warn`; everything else at `debug`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        match &event.kind {
            EventKind::Factorization { dim, success: false, .. } => {
                tracing::warn!(timestep = event.timestep, dim, "factorization failed");
            }
            kind => {
                tracing::debug!(timestep = event.timestep, event = ?kind, "simulation_event");
            }
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
