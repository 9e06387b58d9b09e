//! State snapshot serialization for replay and debugging.
//!
//! Snapshots capture the full particle state at a point in time,
//! enabling deterministic replay and diff-based debugging.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use partisim_solver::ParticleSystemState;
use partisim_types::{ParticleId, PartisimError, PartisimResult, Scalar};

/// A complete particle state snapshot, serialized with `bincode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Step index when this snapshot was taken.
    pub timestep: u32,
    /// Simulation time in seconds.
    pub sim_time: Scalar,
    /// Position DoFs `[x0, y0, x1, y1, ...]`.
    pub positions: Vec<Scalar>,
    /// Velocity DoFs.
    pub velocities: Vec<Scalar>,
    /// One mass per particle.
    pub masses: Vec<Scalar>,
    /// Pinned particles.
    pub fixed: Vec<ParticleId>,
}

impl StateSnapshot {
    /// Captures `state` at step `timestep`.
    pub fn capture(timestep: u32, state: &ParticleSystemState) -> Self {
        Self {
            timestep,
            sim_time: state.time(),
            positions: state.positions().to_vec(),
            velocities: state.velocities().to_vec(),
            masses: (0..state.num_particles()).map(|i| state.mass(i)).collect(),
            fixed: state.fixed_particles().collect(),
        }
    }

    /// Number of particles in the snapshot.
    pub fn particle_count(&self) -> usize {
        self.masses.len()
    }

    /// Rebuilds a state from the snapshot, clock included.
    pub fn restore(&self) -> PartisimResult<ParticleSystemState> {
        let pairs = |dofs: &[Scalar]| -> PartisimResult<Vec<DVec2>> {
            if dofs.len() != 2 * self.particle_count() {
                return Err(PartisimError::DimensionMismatch {
                    expected: 2 * self.particle_count(),
                    found: dofs.len(),
                });
            }
            Ok(dofs.chunks_exact(2).map(|c| DVec2::new(c[0], c[1])).collect())
        };
        let state = ParticleSystemState::new(
            &pairs(&self.positions)?,
            &pairs(&self.velocities)?,
            &self.masses,
            &self.fixed,
        )?;
        Ok(state.with_time(self.sim_time))
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> PartisimResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| PartisimError::Serialization(format!("snapshot encoding failed: {e}")))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> PartisimResult<Self> {
        bincode::deserialize(data)
            .map_err(|e| PartisimError::Serialization(format!("snapshot decoding failed: {e}")))
    }
}
