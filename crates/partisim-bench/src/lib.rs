//! # partisim-bench
//!
//! Scenarios and benchmarks for the partisim simulator.
//!
//! Provides three procedural particle scenarios with their force laws,
//! a runner that collects step metrics, a dense Cholesky benchmark on
//! random SPD matrices, and CSV/JSON export for regression tracking.

pub mod factorization;
pub mod metrics;
pub mod runner;
pub mod scenarios;
pub mod scene_forces;

pub use factorization::{factorization_benchmark, random_spd};
pub use metrics::{BenchmarkMetrics, FactorizationMetrics};
pub use runner::{BenchmarkRunner, RunOutcome};
pub use scenarios::{Scenario, ScenarioKind};
pub use scene_forces::{Spring, SpringNetwork, UniformGravity};
