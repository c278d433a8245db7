//! Vector file generation with per-arity timing.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::info;

use poseidon_bn254::vectors::generate_row;
use poseidon_bn254::TestVectors;

use crate::config::VectorConfig;
use crate::error::VectorsError;

/// Time spent on one arity.
#[derive(Clone, Debug)]
pub struct ArityTiming {
    pub arity: usize,
    pub count: usize,
    pub elapsed: Duration,
}

/// Generate the vectors described by `config`, timing each arity.
pub fn generate_vectors(
    config: &VectorConfig,
) -> Result<(TestVectors, Vec<ArityTiming>), VectorsError> {
    let mut rows = Vec::with_capacity(config.max_arity);
    let mut timings = Vec::with_capacity(config.max_arity);

    for arity in 1..=config.max_arity {
        let start = Instant::now();
        rows.push(generate_row(arity, config.count)?);
        let elapsed = start.elapsed();
        info!(
            "Calculated {} poseidon{} hashes in: {:.2?}",
            config.count, arity, elapsed
        );
        timings.push(ArityTiming {
            arity,
            count: config.count,
            elapsed,
        });
    }

    Ok((TestVectors::from_rows(rows)?, timings))
}

/// Write `vectors` as one JSON line, to `output` or to `out` when no path is given.
pub fn write_vectors(
    vectors: &TestVectors,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<(), VectorsError> {
    let json = vectors.to_json()?;
    match output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))?;
            info!(path = %path.display(), "wrote test vectors");
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}
