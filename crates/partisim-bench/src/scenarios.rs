//! Benchmark scenarios: initial state, force laws and config per case.
//!
//! Three canonical scenarios:
//! 1. **Free flight**: one particle thrown sideways under gravity
//! 2. **Pinned pendulum**: a bob on a stiff spring hanging from a pinned anchor
//! 3. **Spring chain**: ten particles joined by springs, first one pinned

use glam::DVec2;
use serde::{Deserialize, Serialize};

use partisim_solver::{ForceSet, ParticleSystemState, SolverConfig};
use partisim_types::{ParticleId, PartisimResult};

use crate::scene_forces::{SpringNetwork, UniformGravity};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    FreeFlight,
    PinnedPendulum,
    SpringChain,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::FreeFlight,
            ScenarioKind::PinnedPendulum,
            ScenarioKind::SpringChain,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::FreeFlight => "free_flight",
            ScenarioKind::PinnedPendulum => "pinned_pendulum",
            ScenarioKind::SpringChain => "spring_chain",
        }
    }

    /// Parses a name produced by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified scenario.
pub struct Scenario {
    pub kind: ScenarioKind,
    /// Initial particle state.
    pub state: ParticleSystemState,
    /// Force laws acting on the particles.
    pub forces: ForceSet,
    pub config: SolverConfig,
    /// Number of steps to simulate.
    pub timesteps: u32,
}

impl Scenario {
    /// One unit mass at the origin moving at (1, 0) m/s, 1 second of flight.
    pub fn free_flight(config: SolverConfig) -> PartisimResult<Self> {
        let masses = [1.0];
        let state = ParticleSystemState::new(
            &[DVec2::ZERO],
            &[DVec2::new(1.0, 0.0)],
            &masses,
            &[],
        )?;
        let forces = ForceSet::new().with(UniformGravity::new(config.gravity.into(), &masses));
        Ok(Self::assemble(ScenarioKind::FreeFlight, state, forces, config, 1.0))
    }

    /// Anchor pinned at the origin, bob at (1, 0) on a spring of rest length 1.
    pub fn pinned_pendulum(config: SolverConfig) -> PartisimResult<Self> {
        let masses = [1.0, 1.0];
        let state = ParticleSystemState::new(
            &[DVec2::ZERO, DVec2::new(1.0, 0.0)],
            &[DVec2::ZERO, DVec2::ZERO],
            &masses,
            &[ParticleId(0)],
        )?;
        let forces = ForceSet::new()
            .with(UniformGravity::new(config.gravity.into(), &masses))
            .with(SpringNetwork::chain(2, 100.0, 1.0));
        Ok(Self::assemble(ScenarioKind::PinnedPendulum, state, forces, config, 2.0))
    }

    /// Ten 0.1 kg particles 0.1 m apart along +x, first one pinned.
    pub fn spring_chain(config: SolverConfig) -> PartisimResult<Self> {
        let count = 10;
        let positions: Vec<DVec2> = (0..count).map(|i| DVec2::new(0.1 * i as f64, 0.0)).collect();
        let masses = vec![0.1; count];
        let state = ParticleSystemState::new(
            &positions,
            &vec![DVec2::ZERO; count],
            &masses,
            &[ParticleId(0)],
        )?;
        let forces = ForceSet::new()
            .with(UniformGravity::new(config.gravity.into(), &masses))
            .with(SpringNetwork::chain(count, 50.0, 0.1));
        Ok(Self::assemble(ScenarioKind::SpringChain, state, forces, config, 1.0))
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind, config: SolverConfig) -> PartisimResult<Self> {
        match kind {
            ScenarioKind::FreeFlight => Self::free_flight(config),
            ScenarioKind::PinnedPendulum => Self::pinned_pendulum(config),
            ScenarioKind::SpringChain => Self::spring_chain(config),
        }
    }

    fn assemble(
        kind: ScenarioKind,
        state: ParticleSystemState,
        forces: ForceSet,
        config: SolverConfig,
        duration: f64,
    ) -> Self {
        let timesteps = (duration / config.dt).round().max(1.0) as u32;
        Self {
            kind,
            state,
            forces,
            config,
            timesteps,
        }
    }
}
