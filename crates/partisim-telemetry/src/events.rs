//! Simulation event types.
//!
//! Events are small value types tagged with the step index that
//! produced them.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number (0-indexed).
    pub timestep: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Step started.
    TimestepBegin {
        /// Simulation clock at the start of the step (seconds).
        sim_time: f64,
    },

    /// Step completed.
    TimestepEnd {
        /// Wall-clock time for the step (seconds).
        wall_time: f64,
        /// Whether the integrator reported success.
        success: bool,
    },

    /// Energy snapshot after a step.
    Energy {
        /// Kinetic energy of the free particles.
        kinetic: f64,
    },

    /// A Cholesky factorization finished.
    Factorization {
        /// Matrix dimension.
        dim: usize,
        /// Whether the blocked kernel was used.
        blocked: bool,
        /// `false` if a non-positive pivot was hit.
        success: bool,
        /// Wall-clock time (seconds).
        wall_time: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given timestep.
    pub fn new(timestep: u32, kind: EventKind) -> Self {
        Self { timestep, kind }
    }
}
