//! # partisim-types
//!
//! Shared types, identifiers, error types, and numerical constants
//! for the partisim particle simulator.
//!
//! This crate has zero domain logic; it defines the vocabulary
//! that all other partisim crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{PartisimError, PartisimResult};
pub use ids::ParticleId;
pub use scalar::Scalar;
