//! Check a vector file against this implementation.

use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use poseidon_bn254::{TestVectors, VectorMismatch};

use crate::error::VectorsError;
use crate::generate::ArityTiming;

/// Outcome of a vector check.
#[derive(Clone, Debug, Default)]
pub struct CheckReport {
    pub timings: Vec<ArityTiming>,
    pub mismatches: Vec<VectorMismatch>,
}

impl CheckReport {
    pub fn is_success(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Number of digests compared.
    pub fn checked(&self) -> usize {
        self.timings.iter().map(|t| t.count).sum()
    }

    /// `Err(Mismatch)` when any digest differed.
    pub fn into_result(self) -> Result<Self, VectorsError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(VectorsError::Mismatch(self.mismatches.len()))
        }
    }
}

/// Recompute every digest in `vectors`, arity by arity.
pub fn check_vectors(vectors: &TestVectors) -> Result<CheckReport, VectorsError> {
    let mut report = CheckReport::default();

    for (i, row) in vectors.rows().iter().enumerate() {
        let arity = i + 1;
        let start = Instant::now();
        let mismatches = vectors.verify_arity(arity)?;
        let elapsed = start.elapsed();

        info!(
            "Calculated {} poseidon{} hashes in: {:.2?}",
            row.len(),
            arity,
            elapsed
        );
        for m in &mismatches {
            warn!(
                arity = m.arity,
                index = m.index,
                expected = %m.expected,
                actual = %m.actual,
                "digest mismatch"
            );
        }

        report.timings.push(ArityTiming {
            arity,
            count: row.len(),
            elapsed,
        });
        report.mismatches.extend(mismatches);
    }

    Ok(report)
}

/// Load and check the vector file at `path`.
pub fn check_file(path: &Path) -> Result<CheckReport, VectorsError> {
    let json = fs::read_to_string(path)?;
    let vectors = TestVectors::from_json(&json)?;
    check_vectors(&vectors)
}
