//! Poseidon hash function for BN254, compatible with circomlib.
//!
//! - [`config`]: per-arity parameters and their JSON form
//! - [`grain`]: constant derivation
//! - [`registry`]: process-wide standard parameters and owned registries
//! - [`permutation`]: the round function
//! - `native`: hash entry points

pub mod config;
pub mod grain;
pub mod permutation;
pub mod registry;
mod native;


pub use config::{
    check_arity, partial_rounds, PoseidonParams, PoseidonParamsSerialized, ALPHA, FULL_ROUNDS,
    MAX_ARITY,
};
pub use native::{hash_with_params, poseidon, poseidon_biguint, poseidon_hash, poseidon_hash_two};
pub use permutation::{permute, permute_with_trace};
pub use registry::{params_file_name, standard_params, ParamRegistry};
