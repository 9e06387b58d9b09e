//! Particle system state: flat DoF buffers for positions, velocities, masses.
//!
//! This is the primary mutable data structure during simulation.
//! Integrators read and write these buffers each timestep.

use glam::DVec2;

use partisim_types::constants::DOFS_PER_PARTICLE;
use partisim_types::{ParticleId, PartisimError, PartisimResult, Scalar};

/// Particle positions, velocities, masses, pinning and clock.
///
/// # Layout
///
/// Positions and velocities are stored as interleaved degrees of freedom,
/// two per particle:
/// ```text
/// x: [x0, y0, x1, y1, x2, y2, ...]
/// v: [vx0, vy0, vx1, vy1, ...]
/// m: [m0, m0, m1, m1, ...]
/// ```
/// Masses are duplicated per DoF so force-to-acceleration conversion is a
/// single element-wise division.
#[derive(Debug, Clone)]
pub struct ParticleSystemState {
    x: Vec<Scalar>,
    v: Vec<Scalar>,
    m: Vec<Scalar>,
    fixed: Vec<bool>,
    time: Scalar,
}

impl ParticleSystemState {
    /// Builds a state from per-particle data.
    ///
    /// Fails if the three sequences differ in length, if any mass is not a
    /// strictly positive finite number, or if a fixed index is out of range.
    pub fn new(
        positions: &[DVec2],
        velocities: &[DVec2],
        masses: &[Scalar],
        fixed: &[ParticleId],
    ) -> PartisimResult<Self> {
        let n = positions.len();
        if velocities.len() != n {
            return Err(PartisimError::DimensionMismatch {
                expected: n,
                found: velocities.len(),
            });
        }
        if masses.len() != n {
            return Err(PartisimError::DimensionMismatch {
                expected: n,
                found: masses.len(),
            });
        }
        if let Some((i, &m)) = masses
            .iter()
            .enumerate()
            .find(|(_, &m)| !(m > 0.0 && m.is_finite()))
        {
            return Err(PartisimError::InvalidState(format!(
                "mass of particle {i} must be positive and finite, got {m}"
            )));
        }

        let mut fixed_mask = vec![false; n];
        for id in fixed {
            if id.index() >= n {
                return Err(PartisimError::InvalidState(format!(
                    "fixed particle {} out of range ({n} particles)",
                    id.index()
                )));
            }
            fixed_mask[id.index()] = true;
        }

        let flatten = |values: &[DVec2]| -> Vec<Scalar> {
            values.iter().flat_map(|p| [p.x, p.y]).collect()
        };

        Ok(Self {
            x: flatten(positions),
            v: flatten(velocities),
            m: masses
                .iter()
                .flat_map(|&m| [m; DOFS_PER_PARTICLE])
                .collect(),
            fixed: fixed_mask,
            time: 0.0,
        })
    }

    /// Builds a state with every particle at rest and none fixed.
    pub fn at_rest(positions: &[DVec2], masses: &[Scalar]) -> PartisimResult<Self> {
        let velocities = vec![DVec2::ZERO; positions.len()];
        Self::new(positions, &velocities, masses, &[])
    }

    /// Sets the starting clock, e.g. when resuming from a snapshot.
    pub fn with_time(mut self, time: Scalar) -> Self {
        self.time = time;
        self
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.fixed.len()
    }

    /// Number of degrees of freedom (`2 · num_particles`).
    pub fn num_dofs(&self) -> usize {
        self.x.len()
    }

    /// Simulation clock (seconds).
    pub fn time(&self) -> Scalar {
        self.time
    }

    /// Position of particle `i`.
    pub fn position(&self, i: usize) -> DVec2 {
        let d = self.dofs(i);
        DVec2::new(self.x[d], self.x[d + 1])
    }

    /// Overwrites the position of particle `i`.
    pub fn set_position(&mut self, i: usize, p: DVec2) {
        let d = self.dofs(i);
        self.x[d] = p.x;
        self.x[d + 1] = p.y;
    }

    /// Velocity of particle `i`.
    pub fn velocity(&self, i: usize) -> DVec2 {
        let d = self.dofs(i);
        DVec2::new(self.v[d], self.v[d + 1])
    }

    /// Overwrites the velocity of particle `i`.
    pub fn set_velocity(&mut self, i: usize, v: DVec2) {
        let d = self.dofs(i);
        self.v[d] = v.x;
        self.v[d + 1] = v.y;
    }

    /// Mass of particle `i`.
    pub fn mass(&self, i: usize) -> Scalar {
        self.m[self.dofs(i)]
    }

    /// Whether particle `i` is kinematically pinned.
    pub fn is_fixed(&self, i: usize) -> bool {
        self.assert_in_range(i);
        self.fixed[i]
    }

    /// Pins or releases particle `i`.
    pub fn set_fixed(&mut self, i: usize, fixed: bool) {
        self.assert_in_range(i);
        self.fixed[i] = fixed;
    }

    /// Ids of all pinned particles, in ascending order.
    pub fn fixed_particles(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.fixed
            .iter()
            .enumerate()
            .filter(|(_, &f)| f)
            .map(|(i, _)| ParticleId(i as u32))
    }

    /// All position DoFs `[x0, y0, x1, y1, ...]`.
    pub fn positions(&self) -> &[Scalar] {
        &self.x
    }

    /// Mutable position DoFs.
    pub fn positions_mut(&mut self) -> &mut [Scalar] {
        &mut self.x
    }

    /// All velocity DoFs.
    pub fn velocities(&self) -> &[Scalar] {
        &self.v
    }

    /// Mutable velocity DoFs.
    pub fn velocities_mut(&mut self) -> &mut [Scalar] {
        &mut self.v
    }

    /// Per-DoF masses `[m0, m0, m1, m1, ...]`.
    pub fn dof_masses(&self) -> &[Scalar] {
        &self.m
    }

    /// Compute total kinetic energy: 0.5 * Σ m_k * v_k², pinned particles excluded.
    pub fn kinetic_energy(&self) -> Scalar {
        let mut energy = 0.0;
        for (k, (&m, &v)) in self.m.iter().zip(&self.v).enumerate() {
            if !self.fixed[k / DOFS_PER_PARTICLE] {
                energy += 0.5 * m * v * v;
            }
        }
        energy
    }

    /// Splits the state into disjoint borrows for an integrator update:
    /// positions and velocities mutable, masses read-only.
    pub(crate) fn kinematics_mut(&mut self) -> (&mut [Scalar], &mut [Scalar], &[Scalar]) {
        (&mut self.x, &mut self.v, &self.m)
    }

    pub(crate) fn advance_time(&mut self, dt: Scalar) {
        self.time += dt;
    }

    #[inline]
    fn dofs(&self, i: usize) -> usize {
        self.assert_in_range(i);
        i * DOFS_PER_PARTICLE
    }

    #[inline]
    fn assert_in_range(&self, i: usize) {
        assert!(
            i < self.fixed.len(),
            "particle index {i} out of range ({} particles)",
            self.fixed.len()
        );
    }
}
