//! Per-arity parameter statistics and hashing cost.

use std::time::{Duration, Instant};

use serde::Serialize;

use poseidon_bn254::{hash_with_params, standard_params, Fr};

use crate::error::VectorsError;

/// Shape and measured cost of one arity.
#[derive(Clone, Debug, Serialize)]
pub struct ArityStats {
    pub arity: usize,
    pub width: usize,
    pub full_rounds: usize,
    pub partial_rounds: usize,
    pub round_constants: usize,
    /// x^5 evaluations per hash
    pub sboxes: usize,
    pub avg_hash_micros: f64,
}

/// Collect stats for `arity`, averaging the hash time over `samples` calls.
pub fn arity_stats(arity: usize, samples: u32) -> Result<ArityStats, VectorsError> {
    let params = standard_params(arity)?;
    let width = params.width();

    let samples = samples.max(1);
    let inputs = vec![Fr::from(1u64); arity];
    let mut total = Duration::ZERO;
    for _ in 0..samples {
        let start = Instant::now();
        hash_with_params(params, &inputs)?;
        total += start.elapsed();
    }

    Ok(ArityStats {
        arity,
        width,
        full_rounds: params.full_rounds(),
        partial_rounds: params.partial_rounds(),
        round_constants: params.total_rounds() * width,
        sboxes: params.full_rounds() * width + params.partial_rounds(),
        avg_hash_micros: total.as_secs_f64() * 1e6 / f64::from(samples),
    })
}

/// Stats for arities `1..=max_arity`.
pub fn all_stats(max_arity: usize, samples: u32) -> Result<Vec<ArityStats>, VectorsError> {
    (1..=max_arity).map(|arity| arity_stats(arity, samples)).collect()
}
