//! Explicit time integrators.
//!
//! Both integrators share the same force pass (negate the potential
//! gradient, zero the force on pinned particles) and differ only in the
//! order of the position and velocity updates.

use partisim_types::Scalar;

use crate::forces::ForceAccumulator;
use crate::state::ParticleSystemState;
use crate::strategy::TimeIntegrator;

/// Returns `F = −∇U(x)` with the force on every fixed particle zeroed.
pub fn constrained_forces(state: &ParticleSystemState, forces: &dyn ForceAccumulator) -> Vec<Scalar> {
    let mut f = vec![0.0; state.num_dofs()];
    forces.accumulate_gradient(state.positions(), &mut f);
    for fk in &mut f {
        *fk = -*fk;
    }
    for id in state.fixed_particles() {
        f[id.dofs()].fill(0.0);
    }
    f
}

/// Converts forces into accelerations in place: `a_k = F_k / m_k`.
///
/// # Panics
/// Panics if the force, position, velocity and mass buffers differ in length.
fn forces_to_accelerations(f: &mut [Scalar], x: &[Scalar], v: &[Scalar], masses: &[Scalar]) {
    assert!(
        f.len() == masses.len() && x.len() == masses.len() && v.len() == masses.len(),
        "buffer length mismatch: force {}, position {}, velocity {}, mass {}",
        f.len(),
        x.len(),
        v.len(),
        masses.len()
    );
    for (fk, &mk) in f.iter_mut().zip(masses) {
        *fk /= mk;
    }
}

/// Forward (explicit) Euler.
///
/// ```text
/// x ← x + dt·v_old
/// v ← v_old + dt·M⁻¹F(x_old)
/// ```
///
/// Position uses the pre-step velocity. This is the textbook forward Euler
/// step and gains energy on oscillatory systems; [`SymplecticEuler`] is the
/// stable alternative. Pinned particles receive no acceleration but still
/// drift with whatever velocity they carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl ExplicitEuler {
    pub fn new() -> Self {
        Self
    }
}

impl TimeIntegrator for ExplicitEuler {
    fn step(
        &mut self,
        state: &mut ParticleSystemState,
        forces: &dyn ForceAccumulator,
        dt: Scalar,
    ) -> bool {
        let mut f = constrained_forces(state, forces);

        let (x, v, m) = state.kinematics_mut();
        forces_to_accelerations(&mut f, x, v, m);
        for (xk, &vk) in x.iter_mut().zip(v.iter()) {
            *xk += dt * vk;
        }
        for (vk, &ak) in v.iter_mut().zip(&f) {
            *vk += dt * ak;
        }

        state.advance_time(dt);
        tracing::trace!(time = state.time(), dt, "explicit euler step");
        true
    }

    fn name(&self) -> &str {
        "explicit_euler"
    }
}

/// Semi-implicit (symplectic) Euler.
///
/// ```text
/// v ← v_old + dt·M⁻¹F(x_old)
/// x ← x + dt·v_new
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SymplecticEuler;

impl SymplecticEuler {
    pub fn new() -> Self {
        Self
    }
}

impl TimeIntegrator for SymplecticEuler {
    fn step(
        &mut self,
        state: &mut ParticleSystemState,
        forces: &dyn ForceAccumulator,
        dt: Scalar,
    ) -> bool {
        let mut f = constrained_forces(state, forces);

        let (x, v, m) = state.kinematics_mut();
        forces_to_accelerations(&mut f, x, v, m);
        for (vk, &ak) in v.iter_mut().zip(&f) {
            *vk += dt * ak;
        }
        for (xk, &vk) in x.iter_mut().zip(v.iter()) {
            *xk += dt * vk;
        }

        state.advance_time(dt);
        tracing::trace!(time = state.time(), dt, "symplectic euler step");
        true
    }

    fn name(&self) -> &str {
        "symplectic_euler"
    }
}
