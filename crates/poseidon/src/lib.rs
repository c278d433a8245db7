//! Poseidon hash over the BN254 scalar field, compatible with circomlib.
//!
//! This crate provides:
//! - `field`: scalar field helpers and strict integer/hex conversions
//! - `poseidon`: parameters, permutation and the hash entry points for
//!   arities 1 to 16
//! - `vectors`: generation and checking of cross-implementation test vectors

pub mod error;
pub mod field;
pub mod poseidon;
pub mod vectors;

#[cfg(test)]
mod tests;

pub use error::{PoseidonError, PoseidonResult};
pub use poseidon::{
    hash_with_params, poseidon, poseidon_biguint, poseidon_hash, poseidon_hash_two,
    standard_params, ParamRegistry, PoseidonParams, MAX_ARITY,
};
pub use vectors::{TestVectors, VectorMismatch};

pub use ark_bn254::Fr;
