//! Simulation config file (TOML).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use partisim_bench::ScenarioKind;
use partisim_solver::SolverConfig;
use partisim_types::{PartisimError, PartisimResult};

/// Contents of a `simulate --config` file.
///
/// ```toml
/// scenario = "spring_chain"
/// steps = 500
/// snapshot = "chain.bin"
///
/// [solver]
/// dt = 0.001
/// integrator = "symplectic_euler"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Scenario name, see [`ScenarioKind::name`].
    pub scenario: String,
    /// Step count; the scenario's own duration when absent.
    #[serde(default)]
    pub steps: Option<u32>,
    #[serde(default)]
    pub solver: SolverConfig,
    /// Where to write a snapshot of the final state.
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
    /// Log the full state every this many steps (at debug level).
    #[serde(default)]
    pub trace_every: Option<u32>,
}

impl SimulationConfig {
    pub fn from_toml(text: &str) -> PartisimResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| PartisimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> PartisimResult<Self> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    pub fn scenario_kind(&self) -> PartisimResult<ScenarioKind> {
        ScenarioKind::from_name(&self.scenario).ok_or_else(|| {
            let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
            PartisimError::InvalidConfig(format!(
                "unknown scenario '{}', available: {}",
                self.scenario,
                available.join(", ")
            ))
        })
    }

    pub fn validate(&self) -> PartisimResult<()> {
        self.scenario_kind()?;
        if self.steps == Some(0) {
            return Err(PartisimError::InvalidConfig("steps must be at least 1".into()));
        }
        self.solver.validate()
    }
}
