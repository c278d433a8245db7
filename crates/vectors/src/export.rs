//! Export the standard parameters as circomlib-style JSON files.

use std::path::{Path, PathBuf};

use tracing::info;

use poseidon_bn254::{standard_params, ParamRegistry};

use crate::error::VectorsError;

/// Write `<arity>.json` into `dir` for each requested arity.
pub fn export_params(dir: &Path, arities: &[usize]) -> Result<Vec<PathBuf>, VectorsError> {
    let mut registry = ParamRegistry::new();
    for &arity in arities {
        registry.insert(standard_params(arity)?.clone());
    }
    let written = registry.save_dir(dir)?;
    info!(files = written.len(), dir = %dir.display(), "exported Poseidon parameters");
    Ok(written)
}
