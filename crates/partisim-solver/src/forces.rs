//! Force accumulation contract.
//!
//! Integrators never see force laws directly. They hand the current
//! positions to a [`ForceAccumulator`] and get back the gradient of the
//! total potential energy, from which force is `F = −∇U`.

use partisim_types::Scalar;

/// Trait for force laws (gravity, springs, penalties, ...).
///
/// Implementations must *add* their contribution into `gradient` so that
/// several accumulators can share one buffer.
pub trait ForceAccumulator {
    /// Adds `∇U(positions)` into `gradient`.
    ///
    /// Both slices have length `2 · num_particles`.
    fn accumulate_gradient(&self, positions: &[Scalar], gradient: &mut [Scalar]);

    /// Returns the force law's name.
    fn name(&self) -> &str;
}

/// The empty force field: zero potential everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoForce;

impl ForceAccumulator for NoForce {
    fn accumulate_gradient(&self, _positions: &[Scalar], _gradient: &mut [Scalar]) {}

    fn name(&self) -> &str {
        "no_force"
    }
}

/// A composition of force laws whose gradients are summed.
#[derive(Default)]
pub struct ForceSet {
    forces: Vec<Box<dyn ForceAccumulator>>,
}

impl ForceSet {
    /// Creates an empty set (equivalent to [`NoForce`]).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a force law to the set.
    pub fn push(&mut self, force: Box<dyn ForceAccumulator>) {
        self.forces.push(force);
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, force: impl ForceAccumulator + 'static) -> Self {
        self.push(Box::new(force));
        self
    }

    /// Number of force laws in the set.
    pub fn len(&self) -> usize {
        self.forces.len()
    }

    /// Returns true if the set holds no force laws.
    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    /// Names of the contained force laws, in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.forces.iter().map(|f| f.name()).collect()
    }
}

impl ForceAccumulator for ForceSet {
    fn accumulate_gradient(&self, positions: &[Scalar], gradient: &mut [Scalar]) {
        for force in &self.forces {
            force.accumulate_gradient(positions, gradient);
        }
    }

    fn name(&self) -> &str {
        "force_set"
    }
}
