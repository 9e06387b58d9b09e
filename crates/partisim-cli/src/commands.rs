//! CLI command implementations.

use std::path::Path;

use partisim_bench::factorization::factorization_benchmark;
use partisim_bench::metrics::{BenchmarkMetrics, FactorizationMetrics};
use partisim_bench::runner::BenchmarkRunner;
use partisim_bench::scenarios::{Scenario, ScenarioKind};
use partisim_debug::hooks::{InspectionHook, StateTraceHook};
use partisim_debug::snapshot::StateSnapshot;
use partisim_debug::MatrixFormat;
use partisim_math::LltStrategy;
use partisim_solver::SolverConfig;
use partisim_telemetry::{EventBus, TracingSink};
use partisim_types::constants::DOFS_PER_PARTICLE;

use crate::config::SimulationConfig;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Run a simulation from config file.
pub fn simulate(config_path: &str) -> CliResult {
    let config = SimulationConfig::load(Path::new(config_path))?;
    let mut scenario = Scenario::from_kind(config.scenario_kind()?, config.solver.clone())?;
    if let Some(steps) = config.steps {
        scenario.timesteps = steps;
    }

    println!("partisim simulation");
    println!("───────────────────");
    println!("Config:     {config_path}");
    println!("Scenario:   {}", scenario.kind.name());
    println!("Integrator: {}", config.solver.integrator.name());
    println!("Steps:      {} (dt = {})", scenario.timesteps, config.solver.dt);
    println!();

    let mut hooks: Vec<Box<dyn InspectionHook>> = Vec::new();
    if let Some(every) = config.trace_every {
        hooks.push(Box::new(StateTraceHook::new(every)));
    }
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new()));

    let outcome = BenchmarkRunner::run_with_telemetry(&scenario, &mut hooks, &mut bus)?;
    let metrics = &outcome.metrics;

    println!("  Wall time:     {:.4}s", metrics.total_wall_time);
    println!("  Final time:    {:.4}s", metrics.final_time);
    println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
    println!("  Max displace:  {:.4}m", metrics.max_displacement);

    if let Some(path) = &config.snapshot {
        let snapshot = StateSnapshot::capture(scenario.timesteps, &outcome.final_state);
        std::fs::write(path, snapshot.to_bytes()?)?;
        println!("Snapshot written to: {}", path.display());
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, output_path: Option<&str>) -> CliResult {
    println!("partisim benchmark suite");
    println!("════════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        match ScenarioKind::from_name(scenario_name) {
            Some(kind) => vec![kind],
            None => {
                let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                return Err(format!(
                    "unknown scenario: {scenario_name} (available: {}, all)",
                    available.join(", ")
                )
                .into());
            }
        }
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind, SolverConfig::default())?;

        println!(
            "Running: {} ({} particles, {} steps)",
            kind.name(),
            scenario.state.num_particles(),
            scenario.timesteps,
        );

        let metrics = BenchmarkRunner::run(&scenario)
            .map_err(|e| format!("benchmark failed: {e}"))?
            .metrics;

        println!("  Wall time:     {:.4}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}µs", metrics.avg_step_time * 1e6);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}m", metrics.max_displacement);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Factor a random SPD matrix with one or both kernels.
pub fn factor(size: usize, seed: u64, strategy: &str) -> CliResult {
    let strategies = if strategy == "both" {
        vec![LltStrategy::Blocked, LltStrategy::Unblocked]
    } else {
        let parsed = LltStrategy::from_name(strategy).ok_or_else(|| {
            format!("unknown strategy: {strategy} (available: blocked, unblocked, both)")
        })?;
        vec![parsed]
    };

    println!("Cholesky factorization, n = {size}, seed = {seed}");
    println!();
    println!("{}", FactorizationMetrics::to_csv_header());
    for strategy in strategies {
        let metrics = factorization_benchmark(size, seed, strategy, &mut [])?;
        println!("{}", metrics.to_csv_row());
        if !metrics.success {
            return Err(format!("{} factorization failed", strategy.name()).into());
        }
    }

    Ok(())
}

/// Inspect a state snapshot.
pub fn inspect(path: &str) -> CliResult {
    println!("partisim snapshot inspector");
    println!("───────────────────────────");
    println!();

    let data = std::fs::read(path)?;
    let snapshot = StateSnapshot::from_bytes(&data)?;
    let state = snapshot.restore()?;

    println!("Timestep:     {}", snapshot.timestep);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Particles:    {}", snapshot.particle_count());
    println!("Fixed:        {}", snapshot.fixed.len());
    println!("Kinetic:      {:.6e}", state.kinetic_energy());

    if state.num_particles() > 0 {
        let (min_y, max_y) = (0..state.num_particles())
            .map(|i| state.position(i).y)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
        println!("Y range:      [{min_y:.4}, {max_y:.4}]");
    }

    let format = MatrixFormat::clean();
    println!();
    println!("Positions:");
    println!("{}", format.dofs(state.positions(), DOFS_PER_PARTICLE));
    println!("Velocities:");
    println!("{}", format.dofs(state.velocities(), DOFS_PER_PARTICLE));

    Ok(())
}

/// Validate a simulation config.
pub fn validate(path: &str) -> CliResult {
    println!("partisim validator");
    println!("──────────────────");
    println!();

    if !path.ends_with(".toml") {
        return Err("unsupported file format, expected a .toml simulation config".into());
    }

    println!("Validating config: {path}");
    let config = SimulationConfig::load(Path::new(path))?;
    println!(
        "Config is valid: scenario {}, integrator {}, dt {}.",
        config.scenario,
        config.solver.integrator.name(),
        config.solver.dt
    );

    Ok(())
}
