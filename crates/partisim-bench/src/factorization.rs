//! Dense Cholesky benchmark on random SPD matrices.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use partisim_debug::InspectionHook;
use partisim_math::{llt_block_size, DenseMatrix, Llt, LltStrategy};
use partisim_types::constants::BLOCKED_LLT_THRESHOLD;
use partisim_types::{PartisimError, PartisimResult};

use crate::metrics::FactorizationMetrics;

/// Reproducible SPD matrix `B·Bᵀ + n·I` with `B` uniform in `[-1, 1]`.
pub fn random_spd(n: usize, seed: u64) -> DenseMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let b = DenseMatrix::from_fn(n, n, |_, _| rng.gen_range(-1.0..=1.0));
    let mut a = b.mul(&b.transpose());
    for i in 0..n {
        a[(i, i)] += n as f64;
    }
    a
}

/// Factors a random `n×n` SPD matrix with `strategy` and measures the result.
///
/// Hooks see one `on_factorization` call.
pub fn factorization_benchmark(
    n: usize,
    seed: u64,
    strategy: LltStrategy,
    hooks: &mut [Box<dyn InspectionHook>],
) -> PartisimResult<FactorizationMetrics> {
    if n == 0 {
        return Err(PartisimError::InvalidConfig(
            "factorization size must be at least 1".into(),
        ));
    }

    let a = random_spd(n, seed);
    let mut llt = Llt::new().with_strategy(strategy);

    let start = Instant::now();
    llt.compute(&a);
    let factor_time = start.elapsed().as_secs_f64();

    let info = llt.info().ok_or_else(|| {
        PartisimError::InvalidState("factorization did not record a status".into())
    })?;
    let blocked = strategy == LltStrategy::Blocked && n >= BLOCKED_LLT_THRESHOLD;
    for hook in hooks.iter_mut() {
        hook.on_factorization(n, blocked, info, factor_time);
    }

    let success = llt.check().is_ok();
    let (reconstruction_error, solve_residual) = if success {
        let ones = vec![1.0; n];
        let x = llt.solve(&ones);
        let residual = a
            .mul_vec(&x)
            .iter()
            .fold(0.0f64, |m, r| m.max((r - 1.0).abs()));
        (llt.reconstructed_matrix().max_abs_diff(&a), residual)
    } else {
        (f64::INFINITY, f64::INFINITY)
    };

    tracing::info!(
        dim = n,
        strategy = strategy.name(),
        success,
        factor_ms = factor_time * 1000.0,
        reconstruction_error,
        "factorization benchmark"
    );

    Ok(FactorizationMetrics {
        dim: n,
        strategy,
        block_size: llt_block_size(n),
        success,
        factor_time,
        reconstruction_error,
        solve_residual,
    })
}
