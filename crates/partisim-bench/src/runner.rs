//! Benchmark runner: executes scenarios with their integrator and collects metrics.

use std::time::Instant;

use partisim_debug::{InspectionHook, TelemetryHook};
use partisim_solver::{Integrator, ParticleSystemState, SolverConfig, TimeIntegrator};
use partisim_telemetry::EventBus;
use partisim_types::PartisimResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Metrics plus the state the run ended in.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub metrics: BenchmarkMetrics,
    pub final_state: ParticleSystemState,
}

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario without hooks.
    pub fn run(scenario: &Scenario) -> PartisimResult<RunOutcome> {
        Self::run_with_hooks(scenario, &mut [])
    }

    /// Run a scenario, calling every hook around each step.
    pub fn run_with_hooks(
        scenario: &Scenario,
        hooks: &mut [Box<dyn InspectionHook>],
    ) -> PartisimResult<RunOutcome> {
        Self::drive(scenario, hooks, None)
    }

    /// Run a scenario and publish per-step telemetry on `bus`.
    ///
    /// Events are flushed to the bus sinks after every step.
    pub fn run_with_telemetry(
        scenario: &Scenario,
        hooks: &mut [Box<dyn InspectionHook>],
        bus: &mut EventBus,
    ) -> PartisimResult<RunOutcome> {
        Self::drive(scenario, hooks, Some(bus))
    }

    /// Run all scenarios with `config`'s defaults and return metrics for each.
    pub fn run_all(config: &SolverConfig) -> PartisimResult<Vec<BenchmarkMetrics>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind, config.clone())?;
            results.push(Self::run(&scenario)?.metrics);
        }
        Ok(results)
    }

    fn drive(
        scenario: &Scenario,
        hooks: &mut [Box<dyn InspectionHook>],
        mut bus: Option<&mut EventBus>,
    ) -> PartisimResult<RunOutcome> {
        scenario.config.validate()?;

        let span = tracing::info_span!("scenario", name = scenario.kind.name());
        let _guard = span.enter();

        let mut integrator = Integrator::from_kind(scenario.config.integrator);
        let mut state = scenario.state.clone();
        let initial = state.clone();
        let mut telemetry = TelemetryHook::new();

        tracing::info!(
            integrator = integrator.name(),
            particles = state.num_particles(),
            steps = scenario.timesteps,
            dt = scenario.config.dt,
            "starting run"
        );

        let mut step_times = Vec::with_capacity(scenario.timesteps as usize);
        let mut failed_steps = 0u32;
        let total_start = Instant::now();

        for timestep in 0..scenario.timesteps {
            for hook in hooks.iter_mut() {
                hook.on_timestep_begin(timestep, &state);
            }
            if bus.is_some() {
                telemetry.on_timestep_begin(timestep, &state);
            }

            let start = Instant::now();
            let success = integrator.step(&mut state, &scenario.forces, scenario.config.dt);
            let wall_time = start.elapsed().as_secs_f64();
            step_times.push(wall_time);
            if !success {
                failed_steps += 1;
                tracing::warn!(timestep, "integrator reported a failed step");
            }

            for hook in hooks.iter_mut() {
                hook.on_timestep_end(timestep, &state, wall_time, success);
            }
            if let Some(bus) = bus.as_deref_mut() {
                telemetry.on_timestep_end(timestep, &state, wall_time, success);
                for event in telemetry.drain_events() {
                    bus.emit(event);
                }
                bus.flush();
            }
        }

        for hook in hooks.iter_mut() {
            hook.on_simulation_end();
        }
        if let Some(bus) = bus {
            bus.finish();
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();

        let max_displacement = (0..state.num_particles())
            .map(|i| state.position(i).distance(initial.position(i)))
            .fold(0.0, f64::max);

        let avg_step_time = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step_time = step_times.iter().copied().fold(f64::INFINITY, f64::min);
        let max_step_time = step_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            integrator: integrator.name().to_string(),
            particle_count: state.num_particles(),
            timesteps: scenario.timesteps,
            failed_steps,
            total_wall_time,
            avg_step_time,
            min_step_time: if step_times.is_empty() { 0.0 } else { min_step_time },
            max_step_time,
            final_kinetic_energy: state.kinetic_energy(),
            max_displacement,
            final_time: state.time(),
        };

        tracing::info!(
            wall_time = metrics.total_wall_time,
            kinetic = metrics.final_kinetic_energy,
            "run complete"
        );

        Ok(RunOutcome {
            metrics,
            final_state: state,
        })
    }
}
