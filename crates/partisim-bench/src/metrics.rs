//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

use partisim_math::LltStrategy;

/// Metrics collected from a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Integrator name.
    pub integrator: String,
    pub particle_count: usize,
    /// Number of timesteps executed.
    pub timesteps: u32,
    /// Steps whose integrator reported failure.
    pub failed_steps: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per timestep (seconds).
    pub avg_step_time: f64,
    pub min_step_time: f64,
    pub max_step_time: f64,
    /// Kinetic energy of the free particles at the end of the run.
    pub final_kinetic_energy: f64,
    /// Largest particle distance from its initial position.
    pub max_displacement: f64,
    /// Simulation clock at the end of the run.
    pub final_time: f64,
}

impl BenchmarkMetrics {
    /// CSV header matching [`to_csv_row`](Self::to_csv_row).
    pub fn to_csv_header() -> String {
        "scenario,integrator,particle_count,timesteps,failed_steps,total_wall_time_s,avg_step_us,min_step_us,max_step_us,final_ke,max_displacement,final_time".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6},{:.3},{:.3},{:.3},{:.6e},{:.6},{:.6}",
            self.scenario,
            self.integrator,
            self.particle_count,
            self.timesteps,
            self.failed_steps,
            self.total_wall_time,
            self.avg_step_time * 1e6,
            self.min_step_time * 1e6,
            self.max_step_time * 1e6,
            self.final_kinetic_energy,
            self.max_displacement,
            self.final_time,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}

/// Result of factoring one random SPD matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorizationMetrics {
    /// Matrix dimension.
    pub dim: usize,
    pub strategy: LltStrategy,
    /// Block size the blocked kernel would use for `dim`.
    pub block_size: usize,
    pub success: bool,
    /// Wall-clock time of the factorization alone (seconds).
    pub factor_time: f64,
    /// `max |L·Lᵀ − A|`.
    pub reconstruction_error: f64,
    /// `max |A·x − b|` for a solve against a ones vector.
    pub solve_residual: f64,
}

impl FactorizationMetrics {
    pub fn to_csv_header() -> String {
        "dim,strategy,block_size,success,factor_time_ms,reconstruction_error,solve_residual"
            .to_string()
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{:.4},{:.3e},{:.3e}",
            self.dim,
            self.strategy.name(),
            self.block_size,
            self.success,
            self.factor_time * 1000.0,
            self.reconstruction_error,
            self.solve_residual,
        )
    }
}
