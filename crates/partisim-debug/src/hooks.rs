//! Inspection hooks for live debugging.
//!
//! Hooks are called by the driver around each step. They observe state
//! read-only; the stepping code never depends on them.

use partisim_math::ComputationInfo;
use partisim_solver::ParticleSystemState;
use partisim_telemetry::events::{EventKind, SimulationEvent};
use partisim_types::constants::DOFS_PER_PARTICLE;

use crate::format::MatrixFormat;

/// Trait for simulation inspection hooks.
///
/// # Lifecycle
///
/// ```text
/// for each step:
///   hook.on_timestep_begin(...)
///   hook.on_timestep_end(...)
/// hook.on_factorization(...)   // whenever a driver factors a matrix
/// hook.on_simulation_end()
/// ```
pub trait InspectionHook: Send {
    /// Called before the integrator runs.
    fn on_timestep_begin(&mut self, timestep: u32, state: &ParticleSystemState) {
        let _ = (timestep, state);
    }

    /// Called after the integrator returns.
    fn on_timestep_end(
        &mut self,
        timestep: u32,
        state: &ParticleSystemState,
        wall_time: f64,
        success: bool,
    ) {
        let _ = (timestep, state, wall_time, success);
    }

    /// Called after a Cholesky factorization.
    fn on_factorization(&mut self, dim: usize, blocked: bool, info: ComputationInfo, wall_time: f64) {
        let _ = (dim, blocked, info, wall_time);
    }

    /// Called when the simulation completes.
    fn on_simulation_end(&mut self) {}

    /// Returns the hook's name for logging.
    fn name(&self) -> &str;
}

/// Hook that records lifecycle calls as telemetry events.
///
/// Collected events are drained by the driver and emitted on the bus.
#[derive(Default)]
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
    last_timestep: u32,
}

impl TelemetryHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains collected events for dispatch.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }
}

impl InspectionHook for TelemetryHook {
    fn on_timestep_begin(&mut self, timestep: u32, state: &ParticleSystemState) {
        self.last_timestep = timestep;
        self.events.push(SimulationEvent::new(
            timestep,
            EventKind::TimestepBegin { sim_time: state.time() },
        ));
    }

    fn on_timestep_end(
        &mut self,
        timestep: u32,
        state: &ParticleSystemState,
        wall_time: f64,
        success: bool,
    ) {
        self.events.push(SimulationEvent::new(
            timestep,
            EventKind::TimestepEnd { wall_time, success },
        ));
        self.events.push(SimulationEvent::new(
            timestep,
            EventKind::Energy { kinetic: state.kinetic_energy() },
        ));
    }

    fn on_factorization(&mut self, dim: usize, blocked: bool, info: ComputationInfo, wall_time: f64) {
        self.events.push(SimulationEvent::new(
            self.last_timestep,
            EventKind::Factorization {
                dim,
                blocked,
                success: info == ComputationInfo::Success,
                wall_time,
            },
        ));
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}

/// Logs particle positions and velocities through `tracing` every
/// `every` steps, formatted with a [`MatrixFormat`].
pub struct StateTraceHook {
    format: MatrixFormat,
    every: u32,
    /// Last rendered block, kept for callers that want the text itself.
    last: Option<String>,
}

impl StateTraceHook {
    /// Creates a hook that fires on every `every`-th step (0 is treated as 1).
    pub fn new(every: u32) -> Self {
        Self {
            format: MatrixFormat::clean(),
            every: every.max(1),
            last: None,
        }
    }

    /// Replaces the formatter.
    pub fn with_format(mut self, format: MatrixFormat) -> Self {
        self.format = format;
        self
    }

    /// Text produced by the most recent firing.
    pub fn last_output(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

impl InspectionHook for StateTraceHook {
    fn on_timestep_end(
        &mut self,
        timestep: u32,
        state: &ParticleSystemState,
        _wall_time: f64,
        _success: bool,
    ) {
        if timestep % self.every != 0 {
            return;
        }
        let text = format!(
            "x:\n{}\nv:\n{}",
            self.format.dofs(state.positions(), DOFS_PER_PARTICLE),
            self.format.dofs(state.velocities(), DOFS_PER_PARTICLE),
        );
        tracing::debug!(timestep, time = state.time(), "state\n{text}");
        self.last = Some(text);
    }

    fn name(&self) -> &str {
        "state_trace_hook"
    }
}
