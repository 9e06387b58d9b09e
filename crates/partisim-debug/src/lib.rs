//! # partisim-debug
//!
//! Diagnostics kept outside the stepping and factorization logic:
//! inspection hooks, binary state snapshots for replay, and a
//! plain-text matrix/vector formatter.

pub mod format;
pub mod hooks;
pub mod snapshot;

pub use format::MatrixFormat;
pub use hooks::{InspectionHook, StateTraceHook, TelemetryHook};
pub use snapshot::StateSnapshot;
