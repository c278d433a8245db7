//! Errors for the vector tooling.

use thiserror::Error;

use poseidon_bn254::PoseidonError;

/// Errors while generating, checking or exporting vectors
#[derive(Error, Debug)]
pub enum VectorsError {
    #[error(transparent)]
    Poseidon(#[from] PoseidonError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{0} digest(s) differ from the recomputed values")]
    Mismatch(usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
