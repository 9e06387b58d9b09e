//! Integrator strategy: the "advance one step" capability.
//!
//! The set of integrators is closed: [`Integrator`] enumerates every
//! variant and dispatches statically through `enum_dispatch`. The variant
//! is chosen once at setup time from [`IntegratorKind`].

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use partisim_types::Scalar;

use crate::forces::ForceAccumulator;
use crate::integrator::{ExplicitEuler, SymplecticEuler};
use crate::state::ParticleSystemState;

/// Trait for time integrators.
///
/// The driver calls `step` once per timestep:
///
/// ```text
/// let mut integrator = Integrator::from_kind(config.integrator);
/// loop {
///     integrator.step(&mut state, &forces, dt);
/// }
/// ```
///
/// An implicit integrator would assemble an SPD system here and solve it
/// through `partisim_math::SpdSolver`, returning `false` when the
/// factorization reports a numerical issue.
#[enum_dispatch]
pub trait TimeIntegrator {
    /// Advances `state` by `dt`. Returns `false` only if the step failed
    /// and the state should be considered unchanged.
    fn step(
        &mut self,
        state: &mut ParticleSystemState,
        forces: &dyn ForceAccumulator,
        dt: Scalar,
    ) -> bool;

    /// Returns the integrator's name.
    fn name(&self) -> &str;
}

/// Every available integrator.
#[enum_dispatch(TimeIntegrator)]
#[derive(Debug, Clone, Copy)]
pub enum Integrator {
    ExplicitEuler,
    SymplecticEuler,
}

/// Serializable selector for [`Integrator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    #[default]
    ExplicitEuler,
    SymplecticEuler,
}

impl Integrator {
    /// Instantiates the integrator selected by `kind`.
    pub fn from_kind(kind: IntegratorKind) -> Self {
        match kind {
            IntegratorKind::ExplicitEuler => ExplicitEuler::new().into(),
            IntegratorKind::SymplecticEuler => SymplecticEuler::new().into(),
        }
    }

    /// The selector this integrator was built from.
    pub fn kind(&self) -> IntegratorKind {
        match self {
            Integrator::ExplicitEuler(_) => IntegratorKind::ExplicitEuler,
            Integrator::SymplecticEuler(_) => IntegratorKind::SymplecticEuler,
        }
    }
}

impl IntegratorKind {
    /// Returns all integrator kinds.
    pub fn all() -> &'static [IntegratorKind] {
        &[IntegratorKind::ExplicitEuler, IntegratorKind::SymplecticEuler]
    }

    /// Returns the snake_case name used in configs and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            IntegratorKind::ExplicitEuler => "explicit_euler",
            IntegratorKind::SymplecticEuler => "symplectic_euler",
        }
    }

    /// Parses a snake_case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}
