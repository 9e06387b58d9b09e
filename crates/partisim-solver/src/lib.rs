//! # partisim-solver
//!
//! Time integration and particle state management.
//!
//! ## Key Types
//!
//! - [`ParticleSystemState`]: flat DoF buffers for positions, velocities, masses
//! - [`ForceAccumulator`]: force-law contract (gradient of potential energy)
//! - [`TimeIntegrator`] / [`Integrator`]: closed set of step strategies
//! - [`SolverConfig`]: timestep and integrator selection

pub mod config;
pub mod forces;
pub mod integrator;
pub mod state;
pub mod strategy;

pub use config::SolverConfig;
pub use forces::{ForceAccumulator, ForceSet, NoForce};
pub use integrator::{ExplicitEuler, SymplecticEuler};
pub use state::ParticleSystemState;
pub use strategy::{Integrator, IntegratorKind, TimeIntegrator};
