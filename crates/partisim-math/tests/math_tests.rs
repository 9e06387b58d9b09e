//! Integration tests for partisim-math.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use partisim_math::{
    llt_in_place_blocked, llt_in_place_unblocked, ComputationInfo, DenseMatrix, Llt,
    LltStrategy, Side, SpdSolver,
};
use partisim_types::PartisimError;

/// Random SPD matrix `B·Bᵀ + n·I`.
fn random_spd(n: usize, seed: u64) -> DenseMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let b = DenseMatrix::from_fn(n, n, |_, _| rng.gen_range(-1.0..1.0));
    let mut a = b.mul(&b.transpose());
    for i in 0..n {
        a[(i, i)] += n as f64;
    }
    a
}

fn random_vec(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect()
}

fn relative_error(a: &DenseMatrix, b: &DenseMatrix) -> f64 {
    a.max_abs_diff(b) / a.max_abs().max(1.0)
}

// ─── DenseMatrix Tests ────────────────────────────────────────

#[test]
fn dense_from_rows_is_row_major_input() {
    let m = DenseMatrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    assert_eq!(m.rows, 2);
    assert_eq!(m.cols, 3);
    assert_eq!(m[(0, 2)], 3.0);
    assert_eq!(m[(1, 0)], 4.0);
    // Column-major storage.
    assert_eq!(m.col(1), &[2.0, 5.0]);
}

#[test]
fn dense_mul_and_transpose() {
    let a = DenseMatrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let p = a.mul(&a.transpose());
    assert_eq!(p, DenseMatrix::from_rows(&[&[5.0, 11.0], &[11.0, 25.0]]));
}

#[test]
fn dense_mul_vec() {
    let a = DenseMatrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]);
    assert_eq!(a.mul_vec(&[1.0, -1.0]), vec![-1.0, -1.0]);
}

#[test]
fn dense_triangles() {
    let a = DenseMatrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]);
    assert_eq!(a.lower_triangle(), DenseMatrix::from_rows(&[&[1.0, 0.0], &[3.0, 4.0]]));
    assert_eq!(a.upper_triangle(), DenseMatrix::from_rows(&[&[1.0, 2.0], &[0.0, 4.0]]));
}

#[test]
fn dense_serialization() {
    let a = random_spd(4, 1);
    let json = serde_json::to_string(&a).unwrap();
    let recovered: DenseMatrix = serde_json::from_str(&json).unwrap();
    // Exact: serde_json parses floats with `float_roundtrip`.
    assert_eq!(recovered, a);
    assert_eq!(recovered.max_abs_diff(&a), 0.0);
}

#[test]
#[should_panic(expected = "out of range")]
fn dense_index_out_of_range_panics() {
    let a = DenseMatrix::zeros(2, 2);
    let _ = a[(2, 0)];
}

// ─── Unblocked Factorization Tests ────────────────────────────

#[test]
fn unblocked_known_factor() {
    let mut a = DenseMatrix::from_rows(&[
        &[4.0, 12.0, -16.0],
        &[12.0, 37.0, -43.0],
        &[-16.0, -43.0, 98.0],
    ]);
    assert!(llt_in_place_unblocked(&mut a, Side::Lower));
    let l = a.lower_triangle();
    let expected = DenseMatrix::from_rows(&[
        &[2.0, 0.0, 0.0],
        &[6.0, 1.0, 0.0],
        &[-8.0, 5.0, 3.0],
    ]);
    assert!(l.max_abs_diff(&expected) < 1e-12, "L = {l:?}");
}

#[test]
fn unblocked_identity() {
    let mut a = DenseMatrix::identity(5);
    assert!(llt_in_place_unblocked(&mut a, Side::Lower));
    assert_eq!(a, DenseMatrix::identity(5));
}

#[test]
fn unblocked_reconstructs_random_spd() {
    for &n in &[1, 2, 7, 31, 50] {
        let a = random_spd(n, n as u64);
        let mut f = a.clone();
        assert!(llt_in_place_unblocked(&mut f, Side::Lower), "n = {n}");
        let l = f.lower_triangle();
        let err = relative_error(&a, &l.mul(&l.transpose()));
        assert!(err < 1e-10, "n = {n}: relative error {err}");
    }
}

#[test]
fn unblocked_indefinite_fails() {
    let mut a = DenseMatrix::from_rows(&[&[1.0, 2.0], &[2.0, 1.0]]);
    assert!(!llt_in_place_unblocked(&mut a, Side::Lower));
}

#[test]
fn zero_pivot_fails() {
    let mut a = DenseMatrix::from_rows(&[&[1.0, 1.0], &[1.0, 1.0]]);
    assert!(!llt_in_place_unblocked(&mut a, Side::Lower));
}

// ─── Blocked Factorization Tests ──────────────────────────────

#[test]
fn blocked_reconstructs_random_spd() {
    for &n in &[8, 31, 32, 33, 64, 100, 150] {
        let a = random_spd(n, 100 + n as u64);
        let mut f = a.clone();
        assert!(llt_in_place_blocked(&mut f, Side::Lower), "n = {n}");
        let l = f.lower_triangle();
        let err = relative_error(&a, &l.mul(&l.transpose()));
        assert!(err < 1e-10, "n = {n}: relative error {err}");
        for i in 0..n {
            assert!(l[(i, i)] > 0.0);
        }
    }
}

#[test]
fn blocked_matches_unblocked() {
    for &n in &[64, 97, 160] {
        let a = random_spd(n, 7 * n as u64);
        let mut blocked = a.clone();
        let mut unblocked = a.clone();
        assert!(llt_in_place_blocked(&mut blocked, Side::Lower));
        assert!(llt_in_place_unblocked(&mut unblocked, Side::Lower));
        let diff = blocked
            .lower_triangle()
            .max_abs_diff(&unblocked.lower_triangle());
        assert!(diff < 1e-10 * a.max_abs().sqrt(), "n = {n}: diff {diff}");
    }
}

#[test]
fn blocked_indefinite_small_fails() {
    let mut a = DenseMatrix::from_rows(&[&[1.0, 2.0], &[2.0, 1.0]]);
    assert!(!llt_in_place_blocked(&mut a, Side::Lower));
}

#[test]
fn blocked_indefinite_large_reports_pivot() {
    let n = 64;
    let mut a = DenseMatrix::identity(n);
    a[(40, 40)] = -1.0;
    let mut llt = Llt::new();
    llt.compute(&a);
    assert_eq!(llt.info(), Some(ComputationInfo::NumericalIssue));
    assert_eq!(llt.failed_pivot(), Some(40));
}

#[test]
fn blocked_nan_pivot_fails() {
    let mut small = DenseMatrix::from_rows(&[&[4.0, 0.0], &[0.0, f64::NAN]]);
    assert!(!llt_in_place_blocked(&mut small, Side::Lower));

    let n = 64;
    let mut a = DenseMatrix::identity(n);
    a[(40, 40)] = f64::NAN;
    assert!(!llt_in_place_blocked(&mut a.clone(), Side::Lower));

    let mut llt = Llt::new();
    llt.compute(&a);
    assert_eq!(llt.info(), Some(ComputationInfo::NumericalIssue));
    assert_eq!(llt.failed_pivot(), Some(40));
}

#[test]
fn blocked_never_touches_upper_half() {
    let n = 100;
    let mut a = random_spd(n, 3);
    for j in 0..n {
        for i in 0..j {
            a[(i, j)] = 12345.0;
        }
    }
    assert!(llt_in_place_blocked(&mut a, Side::Lower));
    for j in 0..n {
        for i in 0..j {
            assert_eq!(a[(i, j)], 12345.0, "upper entry ({i}, {j}) was written");
        }
    }
}

#[test]
fn lower_side_ignores_upper_contents() {
    let clean = random_spd(40, 9);
    let mut dirty = clean.clone();
    for j in 0..40 {
        for i in 0..j {
            dirty[(i, j)] = f64::NAN;
        }
    }
    let mut a = Llt::new();
    let mut b = Llt::new();
    a.compute(&clean);
    b.compute(&dirty);
    assert_eq!(a.matrix_l(), b.matrix_l());
}

// ─── Llt Decomposition Tests ──────────────────────────────────

#[test]
fn llt_starts_uninitialized() {
    let llt = Llt::new();
    assert_eq!(llt.info(), None);
    assert!(!llt.is_factorized());
    assert!(llt.check().is_err());
}

#[test]
fn llt_success_state() {
    let a = random_spd(12, 5);
    let mut llt = Llt::new();
    llt.compute(&a);
    assert_eq!(llt.info(), Some(ComputationInfo::Success));
    assert_eq!(llt.failed_pivot(), None);
    assert!(llt.check().is_ok());
    assert_eq!(llt.dim(), 12);
}

#[test]
fn llt_indefinite_reports_numerical_issue() {
    let a = DenseMatrix::from_rows(&[&[1.0, 2.0], &[2.0, 1.0]]);
    let mut llt = Llt::new();
    llt.compute(&a);
    assert_eq!(llt.info(), Some(ComputationInfo::NumericalIssue));
    assert_eq!(llt.failed_pivot(), Some(1));
    assert!(matches!(
        llt.check(),
        Err(PartisimError::NotPositiveDefinite { pivot: 1 })
    ));
}

#[test]
fn llt_recompute_after_failure() {
    let mut llt = Llt::new();
    llt.compute(&DenseMatrix::from_rows(&[&[1.0, 2.0], &[2.0, 1.0]]));
    assert_eq!(llt.info(), Some(ComputationInfo::NumericalIssue));
    llt.compute(&DenseMatrix::from_rows(&[&[2.0, 1.0], &[1.0, 2.0]]));
    assert_eq!(llt.info(), Some(ComputationInfo::Success));
    assert_eq!(llt.failed_pivot(), None);
}

#[test]
fn llt_reconstructed_matrix() {
    let a = random_spd(70, 11);
    let mut llt = Llt::new();
    llt.compute(&a);
    assert!(relative_error(&a, &llt.reconstructed_matrix()) < 1e-10);
}

#[test]
fn llt_upper_side_matches_lower() {
    let a = random_spd(45, 13);
    let mut lower = Llt::with_side(Side::Lower);
    let mut upper = Llt::with_side(Side::Upper);
    lower.compute(&a);
    upper.compute(&a);
    assert_eq!(upper.info(), Some(ComputationInfo::Success));
    assert!(lower.matrix_l().max_abs_diff(&upper.matrix_l()) < 1e-12);
    assert!(upper.matrix_u().max_abs_diff(&upper.matrix_l().transpose()) < 1e-15);
    // U lives in the upper half of the packed storage.
    let packed = upper.packed_factor();
    assert!(packed[(0, 44)] == upper.matrix_u()[(0, 44)]);
}

#[test]
fn llt_strategy_selection() {
    let a = random_spd(80, 17);
    let mut blocked = Llt::new();
    let mut unblocked = Llt::new().with_strategy(LltStrategy::Unblocked);
    assert_eq!(blocked.strategy(), LltStrategy::Blocked);
    blocked.compute(&a);
    unblocked.compute(&a);
    assert!(blocked.matrix_l().max_abs_diff(&unblocked.matrix_l()) < 1e-10);
}

#[test]
fn llt_strategy_names() {
    assert_eq!(LltStrategy::from_name("blocked"), Some(LltStrategy::Blocked));
    assert_eq!(LltStrategy::from_name(LltStrategy::Unblocked.name()), Some(LltStrategy::Unblocked));
    assert_eq!(LltStrategy::from_name("supernodal"), None);
    assert_eq!(serde_json::to_string(&LltStrategy::Unblocked).unwrap(), "\"unblocked\"");
}

#[test]
fn llt_compute_owned() {
    let a = random_spd(20, 19);
    let mut llt = Llt::new();
    llt.compute_owned(a.clone());
    assert!(relative_error(&a, &llt.reconstructed_matrix()) < 1e-10);
}

#[test]
#[should_panic(expected = "square")]
fn llt_non_square_panics() {
    let mut llt = Llt::new();
    llt.compute(&DenseMatrix::zeros(2, 3));
}

#[test]
fn llt_empty_matrix() {
    let mut llt = Llt::new();
    llt.compute(&DenseMatrix::zeros(0, 0));
    assert_eq!(llt.info(), Some(ComputationInfo::Success));
    let mut b: Vec<f64> = Vec::new();
    assert!(llt.solve_in_place(&mut b));
}

// ─── Solve Tests ──────────────────────────────────────────────

#[test]
fn solve_round_trip() {
    for &n in &[3, 31, 64, 120] {
        let a = random_spd(n, 23 + n as u64);
        let b = random_vec(n, 29 + n as u64);
        let mut llt = Llt::new();
        llt.compute(&a);

        let mut x = b.clone();
        assert!(llt.solve_in_place(&mut x));

        let ax = a.mul_vec(&x);
        let scale = b.iter().fold(1.0_f64, |m, v| m.max(v.abs()));
        for i in 0..n {
            assert!(
                (ax[i] - b[i]).abs() < 1e-10 * scale,
                "n = {n}, row {i}: {} vs {}",
                ax[i],
                b[i]
            );
        }
    }
}

#[test]
fn solve_copy_matches_in_place() {
    let a = random_spd(10, 31);
    let b = random_vec(10, 37);
    let mut llt = Llt::new();
    llt.compute(&a);
    let x = llt.solve(&b);
    let mut y = b.clone();
    llt.solve_in_place(&mut y);
    assert_eq!(x, y);
}

#[test]
fn solve_upper_side() {
    let a = random_spd(33, 41);
    let b = random_vec(33, 43);
    let mut llt = Llt::with_side(Side::Upper);
    llt.compute(&a);
    let x = llt.solve(&b);
    let ax = a.mul_vec(&x);
    for i in 0..33 {
        assert!((ax[i] - b[i]).abs() < 1e-9);
    }
}

#[test]
fn solve_matrix_gives_inverse() {
    let n = 16;
    let a = random_spd(n, 47);
    let mut llt = Llt::new();
    llt.compute(&a);
    let mut x = DenseMatrix::identity(n);
    assert!(llt.solve_matrix_in_place(&mut x));
    let product = a.mul(&x);
    assert!(product.max_abs_diff(&DenseMatrix::identity(n)) < 1e-10);
}

#[test]
fn solve_diagonal_system() {
    let a = DenseMatrix::from_rows(&[&[2.0, 0.0, 0.0], &[0.0, 3.0, 0.0], &[0.0, 0.0, 5.0]]);
    let mut llt = Llt::new();
    llt.compute(&a);
    let x = llt.solve(&[4.0, 9.0, 25.0]);
    assert!((x[0] - 2.0).abs() < 1e-14);
    assert!((x[1] - 3.0).abs() < 1e-14);
    assert!((x[2] - 5.0).abs() < 1e-14);
}

#[test]
#[should_panic(expected = "without a successful factorization")]
fn solve_before_compute_panics() {
    let llt = Llt::new();
    let mut b = [1.0, 2.0];
    llt.solve_in_place(&mut b);
}

#[test]
#[should_panic(expected = "without a successful factorization")]
fn solve_matrix_without_columns_before_compute_panics() {
    let llt = Llt::new();
    let mut b = DenseMatrix::zeros(0, 0);
    llt.solve_matrix_in_place(&mut b);
}

#[test]
#[should_panic(expected = "without a successful factorization")]
fn solve_matrix_without_columns_after_failure_panics() {
    let mut llt = Llt::new();
    llt.compute(&DenseMatrix::from_rows(&[&[1.0, 2.0], &[2.0, 1.0]]));
    let mut b = DenseMatrix::zeros(2, 0);
    llt.solve_matrix_in_place(&mut b);
}

#[test]
#[should_panic(expected = "without a successful factorization")]
fn solve_after_failure_panics() {
    let mut llt = Llt::new();
    llt.compute(&DenseMatrix::from_rows(&[&[1.0, 2.0], &[2.0, 1.0]]));
    let mut b = [1.0, 2.0];
    llt.solve_in_place(&mut b);
}

#[test]
#[should_panic(expected = "right-hand side length")]
fn solve_dimension_mismatch_panics() {
    let mut llt = Llt::new();
    llt.compute(&DenseMatrix::identity(3));
    let mut b = [1.0, 2.0];
    llt.solve_in_place(&mut b);
}

// ─── SpdSolver Trait Tests ────────────────────────────────────

fn solve_with<S: SpdSolver>(solver: &mut S, a: &DenseMatrix, b: &mut [f64]) -> ComputationInfo {
    let info = solver.factorize(a);
    if info == ComputationInfo::Success {
        solver.solve_in_place(b);
    }
    info
}

#[test]
fn spd_solver_trait_dispatch() {
    let a = DenseMatrix::from_rows(&[&[4.0, 1.0, 0.0], &[1.0, 3.0, 1.0], &[0.0, 1.0, 2.0]]);
    let mut b = [1.0, 2.0, 3.0];
    let mut solver = Llt::new();
    assert!(!solver.is_factorized());
    assert_eq!(solve_with(&mut solver, &a, &mut b), ComputationInfo::Success);
    assert!(solver.is_factorized());

    let residual = a.mul_vec(&b);
    assert!((residual[0] - 1.0).abs() < 1e-12);
    assert!((residual[1] - 2.0).abs() < 1e-12);
    assert!((residual[2] - 3.0).abs() < 1e-12);
}

#[test]
fn spd_solver_trait_reports_failure() {
    let a = DenseMatrix::from_rows(&[&[1.0, 2.0], &[2.0, 1.0]]);
    let mut b = [1.0, 1.0];
    let mut solver = Llt::new();
    assert_eq!(solve_with(&mut solver, &a, &mut b), ComputationInfo::NumericalIssue);
    assert!(!solver.is_factorized());
    assert_eq!(b, [1.0, 1.0]);
}
