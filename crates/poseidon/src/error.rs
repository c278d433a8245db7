//! Errors produced by the Poseidon engine.

use thiserror::Error;

/// Errors during parameter setup, input conversion or hashing.
///
/// Every variant is detected before any permutation round runs, so a failed
/// call never yields a partial digest.
#[derive(Error, Debug)]
pub enum PoseidonError {
    #[error("Invalid arity: {0}")]
    InvalidArity(String),
    #[error("Invalid field element: {0}")]
    InvalidFieldElement(String),
    #[error("No Poseidon parameters configured for arity {0}")]
    ConfigurationMissing(usize),
    #[error("Malformed parameters: {0}")]
    MalformedParams(String),
    #[error("Malformed test vectors: {0}")]
    MalformedVectors(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PoseidonResult<T> = Result<T, PoseidonError>;
