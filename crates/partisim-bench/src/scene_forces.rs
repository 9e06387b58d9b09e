//! Force laws used by the benchmark scenes.
//!
//! The core only knows the [`ForceAccumulator`] contract; these are the
//! concrete laws a scene plugs into it.

use glam::DVec2;

use partisim_solver::ForceAccumulator;
use partisim_types::constants::DOFS_PER_PARTICLE;
use partisim_types::Scalar;

/// Constant gravitational field: `U = −Σ mᵢ g·xᵢ`, so `∇U = −mᵢ g`.
#[derive(Debug, Clone)]
pub struct UniformGravity {
    gravity: DVec2,
    masses: Vec<Scalar>,
}

impl UniformGravity {
    /// `masses` holds one mass per particle.
    pub fn new(gravity: DVec2, masses: &[Scalar]) -> Self {
        Self {
            gravity,
            masses: masses.to_vec(),
        }
    }
}

impl ForceAccumulator for UniformGravity {
    fn accumulate_gradient(&self, _positions: &[Scalar], gradient: &mut [Scalar]) {
        for (g, &m) in gradient.chunks_exact_mut(DOFS_PER_PARTICLE).zip(&self.masses) {
            g[0] -= m * self.gravity.x;
            g[1] -= m * self.gravity.y;
        }
    }

    fn name(&self) -> &str {
        "uniform_gravity"
    }
}

/// A Hookean spring between two particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub a: usize,
    pub b: usize,
    pub stiffness: Scalar,
    pub rest_length: Scalar,
}

/// Springs with energy `U = ½k(|xₐ − x_b| − L)²` each.
#[derive(Debug, Clone, Default)]
pub struct SpringNetwork {
    springs: Vec<Spring>,
}

impl SpringNetwork {
    pub fn new(springs: Vec<Spring>) -> Self {
        Self { springs }
    }

    /// Springs joining consecutive particles `0-1, 1-2, ...`.
    pub fn chain(count: usize, stiffness: Scalar, rest_length: Scalar) -> Self {
        let springs = (1..count)
            .map(|b| Spring {
                a: b - 1,
                b,
                stiffness,
                rest_length,
            })
            .collect();
        Self { springs }
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// Total elastic energy at `positions`.
    pub fn energy(&self, positions: &[Scalar]) -> Scalar {
        self.springs
            .iter()
            .map(|s| {
                let stretch = (particle(positions, s.a) - particle(positions, s.b)).length()
                    - s.rest_length;
                0.5 * s.stiffness * stretch * stretch
            })
            .sum()
    }
}

fn particle(positions: &[Scalar], i: usize) -> DVec2 {
    let d = i * DOFS_PER_PARTICLE;
    DVec2::new(positions[d], positions[d + 1])
}

impl ForceAccumulator for SpringNetwork {
    fn accumulate_gradient(&self, positions: &[Scalar], gradient: &mut [Scalar]) {
        for s in &self.springs {
            let delta = particle(positions, s.a) - particle(positions, s.b);
            let length = delta.length();
            if length == 0.0 {
                // Direction undefined; coincident endpoints contribute nothing.
                continue;
            }
            let g = delta * (s.stiffness * (length - s.rest_length) / length);
            let (da, db) = (s.a * DOFS_PER_PARTICLE, s.b * DOFS_PER_PARTICLE);
            gradient[da] += g.x;
            gradient[da + 1] += g.y;
            gradient[db] -= g.x;
            gradient[db + 1] -= g.y;
        }
    }

    fn name(&self) -> &str {
        "spring_network"
    }
}
