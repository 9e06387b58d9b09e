//! Strongly-typed identifiers for simulation entities.
//!
//! Newtype wrappers prevent accidental mixing of particle indices
//! with flat degree-of-freedom indices.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::constants::DOFS_PER_PARTICLE;

/// Index into the particle arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

impl ParticleId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Range of flat DoF indices (`[x, y]`) owned by this particle.
    #[inline]
    pub fn dofs(self) -> Range<usize> {
        let start = self.index() * DOFS_PER_PARTICLE;
        start..start + DOFS_PER_PARTICLE
    }
}

impl From<u32> for ParticleId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
