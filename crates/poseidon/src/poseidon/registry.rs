//! Parameter registries keyed by arity.
//!
//! The standard parameters live in process-wide storage, generated once per
//! arity on first use and never mutated afterwards. [`ParamRegistry`] is an
//! owned alternative for callers that load their own parameter files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use ark_bn254::Fr;
use tracing::{debug, info};

use super::config::{check_arity, PoseidonParams, MAX_ARITY};
use super::native::hash_with_params;
use crate::error::{PoseidonError, PoseidonResult};

static STANDARD: [OnceLock<PoseidonParams>; MAX_ARITY] = [const { OnceLock::new() }; MAX_ARITY];

/// Standard (circomlib) parameters for `arity`, generated lazily once.
pub fn standard_params(arity: usize) -> PoseidonResult<&'static PoseidonParams> {
    check_arity(arity)?;
    let slot = &STANDARD[arity - 1];
    if let Some(params) = slot.get() {
        return Ok(params);
    }
    // Concurrent first calls may both generate; the result is deterministic.
    let params = PoseidonParams::generate(arity)?;
    Ok(slot.get_or_init(|| params))
}

/// Parameter file name for `arity` inside a parameter directory.
pub fn params_file_name(arity: usize) -> String {
    format!("{arity}.json")
}

/// An owned set of parameters keyed by arity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParamRegistry {
    entries: BTreeMap<usize, PoseidonParams>,
}

impl ParamRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the standard parameters for every arity.
    pub fn standard() -> PoseidonResult<Self> {
        let mut registry = Self::new();
        for arity in 1..=MAX_ARITY {
            registry.insert(standard_params(arity)?.clone());
        }
        Ok(registry)
    }

    /// Add parameters, returning the ones previously stored for that arity.
    pub fn insert(&mut self, params: PoseidonParams) -> Option<PoseidonParams> {
        self.entries.insert(params.arity(), params)
    }

    /// Look up the parameters for `arity`.
    pub fn get(&self, arity: usize) -> PoseidonResult<&PoseidonParams> {
        check_arity(arity)?;
        self.entries
            .get(&arity)
            .ok_or(PoseidonError::ConfigurationMissing(arity))
    }

    /// Configured arities in ascending order.
    pub fn arities(&self) -> Vec<usize> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hash `inputs` with the parameters registered for `arity`.
    pub fn hash(&self, arity: usize, inputs: &[Fr]) -> PoseidonResult<Fr> {
        let params = self.get(arity)?;
        hash_with_params(params, inputs)
    }

    /// Load every `<arity>.json` present in `dir`. Missing arities are skipped,
    /// a missing directory is an error.
    pub fn load_dir(dir: &Path) -> PoseidonResult<Self> {
        if !fs::metadata(dir)?.is_dir() {
            return Err(PoseidonError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a directory", dir.display()),
            )));
        }
        let mut registry = Self::new();
        for arity in 1..=MAX_ARITY {
            let path = dir.join(params_file_name(arity));
            if !path.exists() {
                continue;
            }
            let json = fs::read_to_string(&path)?;
            registry.insert(PoseidonParams::from_json(arity, &json)?);
            debug!(arity, path = %path.display(), "loaded Poseidon parameters");
        }
        info!(count = registry.len(), dir = %dir.display(), "loaded parameter directory");
        Ok(registry)
    }

    /// Write one `<arity>.json` per entry into `dir`, creating it if needed.
    pub fn save_dir(&self, dir: &Path) -> PoseidonResult<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.entries.len());
        for (arity, params) in &self.entries {
            let path = dir.join(params_file_name(*arity));
            fs::write(&path, params.to_json()?)?;
            written.push(path);
        }
        Ok(written)
    }
}
