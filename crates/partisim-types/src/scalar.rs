//! Scalar type alias for the simulation.
//!
//! The particle integrator and the dense Cholesky solver both run in
//! double precision; reconstruction tolerances assume `f64`.

/// The floating-point type used throughout the simulation.
pub type Scalar = f64;
