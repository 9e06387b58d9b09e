//! Solver configuration.
//!
//! Parameters that control time integration: step size, integrator
//! choice, and the gravity scenes apply by default.

use serde::{Deserialize, Serialize};

use partisim_types::constants::{DEFAULT_DT, GRAVITY};
use partisim_types::{PartisimError, PartisimResult, Scalar};

use crate::strategy::IntegratorKind;

/// Configuration for the time integrator.
///
/// Missing fields fall back to [`Default`] when deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Timestep size (seconds).
    pub dt: Scalar,

    /// Which integrator advances the state.
    pub integrator: IntegratorKind,

    /// Gravity vector [gx, gy] in m/s², used by scenes that add gravity.
    pub gravity: [Scalar; 2],
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            integrator: IntegratorKind::default(),
            gravity: [0.0, -GRAVITY],
        }
    }
}

impl SolverConfig {
    /// Creates a config for symplectic Euler with the default timestep.
    pub fn symplectic() -> Self {
        Self {
            integrator: IntegratorKind::SymplecticEuler,
            ..Default::default()
        }
    }

    /// Checks that the timestep is positive and finite.
    pub fn validate(&self) -> PartisimResult<()> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(PartisimError::InvalidConfig(format!(
                "dt must be positive and finite, got {}",
                self.dt
            )));
        }
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(PartisimError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        Ok(())
    }
}
