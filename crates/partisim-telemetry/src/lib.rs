//! # partisim-telemetry
//!
//! Event bus for simulation telemetry. Emits structured events
//! (step timing, energy, factorization outcomes) that are consumed
//! by pluggable sinks (in-memory capture, `tracing` logs).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
