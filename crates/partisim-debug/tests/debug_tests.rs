//! Integration tests for partisim-debug.

use glam::DVec2;

use partisim_debug::format::MatrixFormat;
use partisim_debug::hooks::{InspectionHook, StateTraceHook, TelemetryHook};
use partisim_debug::snapshot::StateSnapshot;
use partisim_math::{ComputationInfo, DenseMatrix};
use partisim_solver::ParticleSystemState;
use partisim_telemetry::events::EventKind;
use partisim_types::{ParticleId, PartisimError};

fn sample_state() -> ParticleSystemState {
    ParticleSystemState::new(
        &[DVec2::new(1.0, 2.0), DVec2::new(3.0, 4.0), DVec2::new(5.0, 6.0)],
        &[DVec2::new(0.1, 0.2), DVec2::new(0.3, 0.4), DVec2::new(0.5, 0.6)],
        &[1.0, 2.0, 3.0],
        &[ParticleId(2)],
    )
    .unwrap()
    .with_time(0.7)
}

// ─── Hook Tests ───────────────────────────────────────────────

#[test]
fn telemetry_hook_collects_events() {
    let state = sample_state();
    let mut hook = TelemetryHook::new();
    hook.on_timestep_begin(4, &state);
    hook.on_factorization(6, false, ComputationInfo::NumericalIssue, 1e-6);
    hook.on_timestep_end(4, &state, 0.001, true);

    let events = hook.drain_events();
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| e.timestep == 4));
    assert_eq!(events[0].kind, EventKind::TimestepBegin { sim_time: 0.7 });
    assert!(matches!(
        events[1].kind,
        EventKind::Factorization { dim: 6, success: false, .. }
    ));
    assert!(matches!(events[3].kind, EventKind::Energy { .. }));
}

#[test]
fn hook_drain_clears() {
    let mut hook = TelemetryHook::new();
    hook.on_timestep_begin(0, &sample_state());
    let _ = hook.drain_events();
    assert!(hook.drain_events().is_empty());
}

#[test]
fn hook_names() {
    assert_eq!(TelemetryHook::new().name(), "telemetry_hook");
    assert_eq!(StateTraceHook::new(1).name(), "state_trace_hook");
}

#[test]
fn state_trace_hook_fires_on_interval() {
    let state = sample_state();
    let mut hook = StateTraceHook::new(5);
    hook.on_timestep_end(3, &state, 0.0, true);
    assert!(hook.last_output().is_none());

    hook.on_timestep_end(5, &state, 0.0, true);
    let text = hook.last_output().unwrap();
    assert!(text.starts_with("x:\n[1, 2]\n[3, 4]\n[5, 6]"));
    assert!(text.contains("[0.1, 0.2]"));
}

// ─── Format Tests ─────────────────────────────────────────────

#[test]
fn clean_format_aligns_columns() {
    let m = DenseMatrix::from_rows(&[&[4.0, 12.0], &[12.0, 37.5]]);
    let text = MatrixFormat::clean().matrix(&m);
    assert_eq!(text, "[   4,   12]\n[  12, 37.5]");
}

#[test]
fn inline_format() {
    let m = DenseMatrix::from_rows(&[&[1.0, 0.0], &[0.0, 1.0]]);
    assert_eq!(MatrixFormat::inline().matrix(&m), "[1, 0]; [0, 1]");
}

#[test]
fn dofs_format_groups_by_stride() {
    let text = MatrixFormat::inline().dofs(&[1.0, -2.0, 3.25, 4.0], 2);
    assert_eq!(text, "[1, -2]; [3.25, 4]");
}

// ─── Snapshot Tests ───────────────────────────────────────────

#[test]
fn snapshot_capture() {
    let snap = StateSnapshot::capture(42, &sample_state());
    assert_eq!(snap.timestep, 42);
    assert_eq!(snap.particle_count(), 3);
    assert_eq!(snap.positions, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(snap.masses, vec![1.0, 2.0, 3.0]);
    assert_eq!(snap.fixed, vec![ParticleId(2)]);
    assert!((snap.sim_time - 0.7).abs() < 1e-15);
}

#[test]
fn snapshot_binary_restore() {
    let state = sample_state();
    let bytes = StateSnapshot::capture(9, &state).to_bytes().unwrap();
    let restored = StateSnapshot::from_bytes(&bytes).unwrap().restore().unwrap();

    assert_eq!(restored.positions(), state.positions());
    assert_eq!(restored.velocities(), state.velocities());
    assert_eq!(restored.dof_masses(), state.dof_masses());
    assert!(restored.is_fixed(2));
    assert_eq!(restored.time(), state.time());
}

#[test]
fn snapshot_garbage_bytes_rejected() {
    let result = StateSnapshot::from_bytes(&[1, 2, 3]);
    assert!(matches!(result, Err(PartisimError::Serialization(_))));
}

#[test]
fn snapshot_inconsistent_lengths_rejected() {
    let mut snap = StateSnapshot::capture(0, &sample_state());
    snap.velocities.pop();
    assert!(matches!(
        snap.restore(),
        Err(PartisimError::DimensionMismatch { expected: 6, found: 5 })
    ));
}
